use serde::{Deserialize, Serialize};
use std::fmt;

fn default_room() -> String {
    "test-room".to_string()
}

fn default_identity() -> String {
    "tester".to_string()
}

fn default_token_ttl_seconds() -> u64 {
    3600
}

/// LiveKit connection and token settings.
///
/// The API secret is skipped during serialization and redacted in `Debug`
/// output so it cannot leak through config dumps or logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    /// LiveKit server URL handed to clients (e.g. `wss://host`).
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(skip_serializing, default)]
    pub api_secret: String,
    /// Room joined when the request does not name one. Default: "test-room".
    #[serde(default = "default_room")]
    pub room: String,
    /// Participant identity minted into tokens. Default: "tester".
    #[serde(default = "default_identity")]
    pub identity: String,
    /// JWT token TTL in seconds for join tokens. Default: 3600 (1 hour).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            room: default_room(),
            identity: default_identity(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("room", &self.room)
            .field("identity", &self.identity)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Self::default()
        }
    }

    /// Loads settings from `LIVEKIT_*` environment variables.
    ///
    /// Missing variables leave the corresponding default in place; the
    /// secrets are only validated at mint time.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("LIVEKIT_URL") {
            config.url = url;
        }
        if let Ok(key) = std::env::var("LIVEKIT_API_KEY") {
            config.api_key = key;
        }
        if let Ok(secret) = std::env::var("LIVEKIT_API_SECRET") {
            config.api_secret = secret;
        }
        if let Ok(room) = std::env::var("LIVEKIT_ROOM") {
            config.room = room;
        }
        if let Ok(identity) = std::env::var("LIVEKIT_IDENTITY") {
            config.identity = identity;
        }
        config
    }

    /// Returns true when both secrets are present.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}
