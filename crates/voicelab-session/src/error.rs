use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// The room URL or API base is missing from client configuration.
    #[error("Invalid client configuration: {0}")]
    Misconfigured(String),

    /// The token endpoint could not be reached.
    #[error("Token request failed: {0}")]
    TokenTransport(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success status.
    #[error("Token endpoint returned {status}: {message}")]
    TokenRejected { status: u16, message: String },

    /// An operation that requires a live connection was attempted while
    /// disconnected.
    #[error("Not connected to a room")]
    NotConnected,
}
