//! HTTP client for the token-issuance endpoint.

use crate::error::SessionError;
use serde::Serialize;
use tracing::info;
use voicelab_types::TokenGrant;

#[derive(Debug, Serialize)]
struct TokenRequestBody<'a> {
    /// Room URL hint; the server currently ignores it.
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

/// Fetches join tokens from the Voicelab token service.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    api_base: String,
}

impl TokenClient {
    /// Creates a client for the given API base URL (e.g.
    /// `http://localhost:3000`). An empty base is accepted at construction
    /// and rejected at fetch time so the caller can log the
    /// misconfiguration instead of failing at startup.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Requests a join token via `POST {api_base}/api/token`.
    ///
    /// Transport failures and non-success statuses surface as errors for
    /// the caller to log and abort the connect with; nothing is retried.
    pub async fn fetch(&self, url_hint: Option<&str>) -> Result<TokenGrant, SessionError> {
        if self.api_base.is_empty() {
            return Err(SessionError::Misconfigured(
                "API base URL is not set".to_string(),
            ));
        }

        let endpoint = format!("{}/api/token", self.api_base.trim_end_matches('/'));
        let response = self
            .http
            .post(&endpoint)
            .json(&TokenRequestBody { url: url_hint })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SessionError::TokenRejected {
                status: status.as_u16(),
                message,
            });
        }

        let grant: TokenGrant = response.json().await?;
        info!(identity = %grant.identity, room = %grant.room, "fetched join token");
        Ok(grant)
    }
}
