//! Token-issuance endpoint.

use crate::AppState;
use axum::body::Bytes;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use voicelab_token::TokenError;
use voicelab_types::TokenGrant;

/// Fixed body returned when the LiveKit secrets are absent.
pub const MISCONFIGURED_MESSAGE: &str = "Server misconfigured";

/// Request body for `POST /api/token`.
///
/// The body is optional; the `url` hint is accepted for compatibility with
/// older clients and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// POST /api/token
///
/// Mints a join token for the configured room and identity. Responds 500
/// with a fixed message when either secret is missing; the wrong HTTP
/// method never reaches here (axum's method routing answers 405).
pub async fn issue_token_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TokenGrant>, (StatusCode, String)> {
    // The body is optional and advisory; an absent or unreadable body is
    // treated the same as an empty one.
    if !body.is_empty() {
        if let Ok(TokenRequest { url: Some(hint) }) = serde_json::from_slice(&body) {
            tracing::debug!(hint, "ignoring room URL hint from request body");
        }
    }

    match state.token_service.mint(None, None) {
        Ok(grant) => {
            tracing::info!(identity = %grant.identity, room = %grant.room, "issued join token");
            Ok(Json(grant))
        }
        Err(TokenError::MissingCredentials) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            MISCONFIGURED_MESSAGE.to_string(),
        )),
        Err(e) => {
            tracing::error!("failed to mint token: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate token".to_string(),
            ))
        }
    }
}
