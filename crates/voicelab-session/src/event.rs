//! Room events as observed by the client.
//!
//! These mirror the callbacks the external media SDK delivers: connection
//! lifecycle, participant/track subscription, inbound data messages, and
//! transcription batches. The transport adapter translates SDK callbacks
//! into this enum and pushes them onto the session's event channel.

/// Kind of a published media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

/// One segment of a transcription batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionSegment {
    pub text: String,
    /// Interim segments are never rendered; a batch containing any
    /// non-final segment is ignored entirely.
    pub is_final: bool,
}

impl TranscriptionSegment {
    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// An event delivered by the room's serial event dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The room connection was established.
    Connected,
    /// The room connection was lost or closed.
    Disconnected,
    /// A remote participant joined the room.
    ParticipantJoined { identity: String },
    /// A remote track was subscribed.
    TrackSubscribed {
        /// Track sid, unique within the room.
        sid: String,
        kind: TrackKind,
        /// Identity of the publishing participant.
        participant: String,
        /// Identity this participant publishes on behalf of, when it is an
        /// avatar worker rather than a direct participant.
        on_behalf_of: Option<String>,
    },
    /// A previously subscribed track went away.
    TrackUnsubscribed {
        sid: String,
        kind: TrackKind,
        participant: String,
        on_behalf_of: Option<String>,
    },
    /// An application-level payload arrived on the data channel.
    DataReceived { payload: Vec<u8> },
    /// A batch of transcription segments for one speaker.
    Transcription {
        speaker: String,
        segments: Vec<TranscriptionSegment>,
    },
}
