//! Access-token issuance for the Voicelab demo.
//!
//! Wraps the LiveKit server-side API to mint short-lived join tokens: given
//! an API key/secret pair and a room/identity, produces a signed JWT
//! granting join, publish, subscribe, and data-publish capabilities for
//! that room. Credentials come from process configuration and are never
//! persisted or logged.

pub mod config;
pub mod error;
pub mod service;

pub use config::LiveKitConfig;
pub use error::TokenError;
pub use service::TokenService;
