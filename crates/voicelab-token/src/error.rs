use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    /// The API key or secret is absent from configuration.
    #[error("LiveKit credentials are not configured")]
    MissingCredentials,

    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),
}
