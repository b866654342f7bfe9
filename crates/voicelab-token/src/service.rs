use crate::config::LiveKitConfig;
use crate::error::TokenError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use std::time::Duration;
use voicelab_types::TokenGrant;

/// Mints short-lived LiveKit join tokens from configured credentials.
///
/// Stateless beyond its configuration: every mint is an independent
/// request/response mapping, and issued tokens are trusted to expire via
/// their encoded TTL. No revocation, no retries.
#[derive(Debug, Clone)]
pub struct TokenService {
    config: LiveKitConfig,
}

impl TokenService {
    pub fn new(config: LiveKitConfig) -> Self {
        Self { config }
    }

    /// Returns the browser-facing LiveKit server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Returns true when both secrets are configured.
    pub fn has_credentials(&self) -> bool {
        self.config.has_credentials()
    }

    /// Mints a join token for the given room and identity, falling back to
    /// the configured defaults when either is `None`.
    ///
    /// The grant allows joining the room, publishing and subscribing to
    /// tracks, and publishing data-channel messages.
    pub fn mint(
        &self,
        room: Option<&str>,
        identity: Option<&str>,
    ) -> Result<TokenGrant, TokenError> {
        if !self.config.has_credentials() {
            return Err(TokenError::MissingCredentials);
        }

        let room = room.unwrap_or(&self.config.room);
        let identity = identity.unwrap_or(&self.config.identity);

        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(identity)
            .with_name(identity)
            .with_grants(VideoGrants {
                room_join: true,
                room: room.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds))
            .to_jwt()?;

        tracing::debug!(room, identity, "minted join token");

        Ok(TokenGrant {
            token,
            identity: identity.to_string(),
            room: room.to_string(),
        })
    }
}
