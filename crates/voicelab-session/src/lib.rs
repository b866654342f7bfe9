//! Client-side session logic for the Voicelab demo.
//!
//! Owns the single room connection handle and projects the media SDK's
//! event stream into displayable state. Every hard problem (media
//! transport, track negotiation, transcription) is solved inside the
//! external service; this crate merely observes it: room events arrive on
//! a channel and are reduced, one at a time, into logs, tool-call records,
//! transcript lines, and an end-of-call cost summary.
//!
//! The reduction is deliberately split from the connection plumbing:
//! [`SessionState`] is a pure, synchronous reducer over [`SessionEvent`]s
//! (one logical writer, no locking), while [`RoomSession`] wires the
//! reducer to the connection lifecycle and executes the one side effect a
//! data message can request (disconnect on `call_end`).

pub mod error;
pub mod event;
pub mod session;
pub mod state;
pub mod token_client;

pub use error::SessionError;
pub use event::{SessionEvent, TrackKind, TranscriptionSegment};
pub use session::RoomSession;
pub use state::{FeedItem, SessionState};
pub use token_client::TokenClient;
