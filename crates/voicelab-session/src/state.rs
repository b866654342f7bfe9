//! The pure event reducer behind the client UI.
//!
//! All room events are delivered serially; there is exactly one logical
//! writer, so the reducer is a plain synchronous `&mut self` fold with no
//! locking. The only side effect an event can request — disconnecting the
//! room after a `call_end` message — is returned as a [`SessionCommand`]
//! for the session owner to execute.

use crate::event::{SessionEvent, TrackKind, TranscriptionSegment};
use std::collections::HashMap;
use tracing::debug;
use voicelab_types::{
    is_agent_identity, ConnectionStatus, CostSummary, DataMessage, LogEntry, Severity,
    ToolCallRecord, TranscriptEntry,
};

/// A side effect requested by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Disconnect the room (requested by a `call_end` data message).
    Disconnect,
}

/// A subscribed remote audio track, keyed by sid.
///
/// Stands in for the hidden DOM container of the original UI: each entry
/// is an attached audio element tagged with its participant identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTrack {
    pub participant: String,
}

/// The active avatar video stream, published by an on-behalf participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarTrack {
    pub sid: String,
    pub participant: String,
    pub on_behalf_of: String,
}

/// One row of the console feed (tool calls and transcript lines combined).
#[derive(Debug, Clone, PartialEq)]
pub enum FeedItem {
    ToolCall(ToolCallRecord),
    Transcript(TranscriptEntry),
}

impl FeedItem {
    fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        match self {
            FeedItem::ToolCall(record) => record.timestamp,
            FeedItem::Transcript(entry) => entry.timestamp,
        }
    }
}

/// Accumulated, displayable session state.
#[derive(Debug, Default)]
pub struct SessionState {
    pub status: ConnectionStatus,
    pub agent_ready: bool,
    pub logs: Vec<LogEntry>,
    /// Most recent first (new records are prepended).
    pub tool_calls: Vec<ToolCallRecord>,
    pub transcript: Vec<TranscriptEntry>,
    pub summary: Option<CostSummary>,
    pub audio_tracks: HashMap<String, AudioTrack>,
    pub avatar: Option<AvatarTrack>,
    /// Last finalized text emitted per speaker, for de-duplication.
    last_texts: HashMap<String, String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, message: impl Into<String>, severity: Severity) {
        self.logs.push(LogEntry::new(message, severity));
    }

    /// Whether the avatar video stream is currently active.
    pub fn avatar_active(&self) -> bool {
        self.avatar.is_some()
    }

    /// Projects tool calls and transcript lines into one feed, sorted by
    /// timestamp descending.
    pub fn console_feed(&self) -> Vec<FeedItem> {
        let mut feed: Vec<FeedItem> = self
            .tool_calls
            .iter()
            .cloned()
            .map(FeedItem::ToolCall)
            .chain(self.transcript.iter().cloned().map(FeedItem::Transcript))
            .collect();
        feed.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        feed
    }

    /// Folds one room event into the state.
    ///
    /// Returns a command when the event requires a side effect from the
    /// session owner.
    pub fn apply(&mut self, event: SessionEvent) -> Option<SessionCommand> {
        match event {
            SessionEvent::Connected => {
                self.status = ConnectionStatus::Connected;
                self.agent_ready = false;
                self.log("Connected to room", Severity::Success);
                None
            }
            SessionEvent::Disconnected => {
                self.status = ConnectionStatus::Disconnected;
                self.agent_ready = false;
                self.log("Disconnected from room", Severity::Error);
                None
            }
            SessionEvent::ParticipantJoined { identity } => {
                self.log(format!("Participant joined: {identity}"), Severity::Info);
                None
            }
            SessionEvent::TrackSubscribed {
                sid,
                kind,
                participant,
                on_behalf_of,
            } => {
                self.track_subscribed(sid, kind, participant, on_behalf_of);
                None
            }
            SessionEvent::TrackUnsubscribed {
                sid,
                kind,
                on_behalf_of,
                ..
            } => {
                self.track_unsubscribed(&sid, kind, on_behalf_of.is_some());
                None
            }
            SessionEvent::DataReceived { payload } => self.data_received(&payload),
            SessionEvent::Transcription { speaker, segments } => {
                self.transcription(&speaker, &segments);
                None
            }
        }
    }

    fn track_subscribed(
        &mut self,
        sid: String,
        kind: TrackKind,
        participant: String,
        on_behalf_of: Option<String>,
    ) {
        match kind {
            TrackKind::Audio => {
                if is_agent_identity(&participant) {
                    self.agent_ready = true;
                }
                self.log(
                    format!("Subscribed to audio from {participant}"),
                    Severity::Info,
                );
                self.audio_tracks.insert(sid, AudioTrack { participant });
            }
            TrackKind::Video => {
                // Only on-behalf publishers carry avatar video; any other
                // video track is ignored.
                if let Some(on_behalf_of) = on_behalf_of {
                    self.log(
                        format!("Avatar video active (for {on_behalf_of})"),
                        Severity::Info,
                    );
                    self.avatar = Some(AvatarTrack {
                        sid,
                        participant,
                        on_behalf_of,
                    });
                }
            }
        }
    }

    fn track_unsubscribed(&mut self, sid: &str, kind: TrackKind, on_behalf: bool) {
        match kind {
            TrackKind::Audio => {
                self.audio_tracks.remove(sid);
            }
            TrackKind::Video => {
                if on_behalf {
                    self.avatar = None;
                }
            }
        }
    }

    fn data_received(&mut self, payload: &[u8]) -> Option<SessionCommand> {
        let Some(message) = DataMessage::decode(payload) else {
            // Malformed payloads degrade to a single log line; never fatal.
            self.log(
                format!("Received unrecognized data message ({} bytes)", payload.len()),
                Severity::Info,
            );
            return None;
        };

        match message {
            DataMessage::ToolCall {
                name,
                arguments,
                result,
            } => {
                debug!(tool = %name, "tool call reported");
                self.tool_calls
                    .insert(0, ToolCallRecord::new(name, arguments, result));
                None
            }
            DataMessage::Summary { summary, cost } => {
                let cost = cost.unwrap_or_default();
                self.summary = Some(CostSummary {
                    text: summary,
                    total: cost.total,
                    breakdown: cost.breakdown,
                });
                None
            }
            DataMessage::AgentReady => {
                self.agent_ready = true;
                self.log("Agent is ready", Severity::Success);
                None
            }
            DataMessage::CallEnd => {
                // Repeated delivery is a no-op once disconnected.
                if self.status == ConnectionStatus::Disconnected {
                    return None;
                }
                self.log("Call ended by agent", Severity::Info);
                Some(SessionCommand::Disconnect)
            }
        }
    }

    fn transcription(&mut self, speaker: &str, segments: &[TranscriptionSegment]) {
        // Interim captions are never shown; a batch with any non-final
        // segment is dropped wholesale.
        if segments.iter().any(|segment| !segment.is_final) {
            return;
        }

        let text = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        if text.is_empty() {
            return;
        }
        if self.last_texts.get(speaker).map(String::as_str) == Some(text.as_str()) {
            return;
        }
        self.last_texts.insert(speaker.to_string(), text.clone());

        if is_agent_identity(speaker) {
            self.agent_ready = true;
        }

        // Consecutive finalized utterances from the same most-recent
        // speaker extend the existing line; a speaker switch starts a new
        // one.
        match self.transcript.last_mut() {
            Some(last) if last.speaker == speaker => {
                last.text.push(' ');
                last.text.push_str(&text);
            }
            _ => {
                self.transcript.push(TranscriptEntry::new(speaker, text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use voicelab_types::Severity;

    fn transcription(speaker: &str, texts: &[&str]) -> SessionEvent {
        SessionEvent::Transcription {
            speaker: speaker.to_string(),
            segments: texts.iter().copied().map(TranscriptionSegment::finalized).collect(),
        }
    }

    fn data(value: serde_json::Value) -> SessionEvent {
        SessionEvent::DataReceived {
            payload: value.to_string().into_bytes(),
        }
    }

    #[test]
    fn connect_and_disconnect_reset_agent_ready() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Connected);
        assert_eq!(state.status, ConnectionStatus::Connected);

        state.apply(data(json!({"type": "agent_ready"})));
        assert!(state.agent_ready);

        state.apply(SessionEvent::Disconnected);
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert!(!state.agent_ready);
    }

    #[test]
    fn agent_audio_track_marks_agent_ready() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Connected);
        state.apply(SessionEvent::TrackSubscribed {
            sid: "TR_1".into(),
            kind: TrackKind::Audio,
            participant: "agent-voice".into(),
            on_behalf_of: None,
        });
        assert!(state.agent_ready);
        assert_eq!(
            state.audio_tracks.get("TR_1").map(|t| t.participant.as_str()),
            Some("agent-voice")
        );
    }

    #[test]
    fn human_audio_track_does_not_mark_agent_ready() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::TrackSubscribed {
            sid: "TR_2".into(),
            kind: TrackKind::Audio,
            participant: "tester".into(),
            on_behalf_of: None,
        });
        assert!(!state.agent_ready);
    }

    #[test]
    fn on_behalf_video_replaces_avatar() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::TrackSubscribed {
            sid: "TR_A".into(),
            kind: TrackKind::Video,
            participant: "avatar-worker-1".into(),
            on_behalf_of: Some("agent-voice".into()),
        });
        state.apply(SessionEvent::TrackSubscribed {
            sid: "TR_B".into(),
            kind: TrackKind::Video,
            participant: "avatar-worker-2".into(),
            on_behalf_of: Some("agent-voice".into()),
        });
        assert!(state.avatar_active());
        assert_eq!(state.avatar.as_ref().unwrap().sid, "TR_B");
    }

    #[test]
    fn plain_video_track_is_ignored() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::TrackSubscribed {
            sid: "TR_V".into(),
            kind: TrackKind::Video,
            participant: "tester".into(),
            on_behalf_of: None,
        });
        assert!(!state.avatar_active());
    }

    #[test]
    fn avatar_cleared_only_for_on_behalf_video_unsubscribe() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::TrackSubscribed {
            sid: "TR_A".into(),
            kind: TrackKind::Video,
            participant: "avatar-worker".into(),
            on_behalf_of: Some("agent-voice".into()),
        });

        // A plain video track departing must not clear the avatar.
        state.apply(SessionEvent::TrackUnsubscribed {
            sid: "TR_V".into(),
            kind: TrackKind::Video,
            participant: "tester".into(),
            on_behalf_of: None,
        });
        assert!(state.avatar_active());

        state.apply(SessionEvent::TrackUnsubscribed {
            sid: "TR_A".into(),
            kind: TrackKind::Video,
            participant: "avatar-worker".into(),
            on_behalf_of: Some("agent-voice".into()),
        });
        assert!(!state.avatar_active());
    }

    #[test]
    fn audio_unsubscribe_detaches_track() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::TrackSubscribed {
            sid: "TR_1".into(),
            kind: TrackKind::Audio,
            participant: "agent-voice".into(),
            on_behalf_of: None,
        });
        state.apply(SessionEvent::TrackUnsubscribed {
            sid: "TR_1".into(),
            kind: TrackKind::Audio,
            participant: "agent-voice".into(),
            on_behalf_of: None,
        });
        assert!(state.audio_tracks.is_empty());
    }

    #[test]
    fn tool_calls_are_prepended() {
        let mut state = SessionState::new();
        state.apply(data(json!({"type": "tool_call", "name": "first"})));
        state.apply(data(json!({"type": "tool_call", "name": "second"})));
        let names: Vec<_> = state.tool_calls.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
    }

    #[test]
    fn summary_overwrites_prior_value() {
        let mut state = SessionState::new();
        state.apply(data(json!({"type": "summary", "summary": "draft"})));
        state.apply(data(json!({
            "type": "summary",
            "summary": "final",
            "cost": {"total": 0.05, "breakdown": {"llm": 0.04, "tts": 0.01}}
        })));
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.text, "final");
        assert_eq!(summary.total, Some(0.05));
        assert_eq!(summary.breakdown.len(), 2);
    }

    #[test]
    fn malformed_payload_adds_exactly_one_log_line() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Connected);
        let logs_before = state.logs.len();

        let command = state.apply(SessionEvent::DataReceived {
            payload: b"{not json".to_vec(),
        });

        assert_eq!(command, None);
        assert_eq!(state.logs.len(), logs_before + 1);
        assert_eq!(state.logs.last().unwrap().severity, Severity::Info);
        assert_eq!(state.status, ConnectionStatus::Connected);
        assert!(state.tool_calls.is_empty());
        assert!(state.transcript.is_empty());
        assert!(state.summary.is_none());
    }

    #[test]
    fn call_end_requests_disconnect_once() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Connected);

        let first = state.apply(data(json!({"type": "call_end"})));
        assert_eq!(first, Some(SessionCommand::Disconnect));
        state.apply(SessionEvent::Disconnected);

        // Redelivery after disconnect is a no-op.
        let logs_before = state.logs.len();
        let second = state.apply(data(json!({"type": "call_end"})));
        assert_eq!(second, None);
        assert_eq!(state.logs.len(), logs_before);
    }

    #[test]
    fn same_speaker_batches_merge_instead_of_append() {
        let mut state = SessionState::new();
        state.apply(transcription("tester", &["hello"]));
        state.apply(transcription("tester", &["how are you"]));

        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].text, "hello how are you");
    }

    #[test]
    fn alternating_speakers_append_one_entry_per_switch() {
        let mut state = SessionState::new();
        state.apply(transcription("tester", &["hi"]));
        state.apply(transcription("agent-voice", &["hello!"]));
        state.apply(transcription("tester", &["question"]));

        assert_eq!(state.transcript.len(), 3);
        assert!(state.agent_ready, "agent speech marks the agent ready");
    }

    #[test]
    fn non_final_segment_drops_whole_batch() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Transcription {
            speaker: "tester".into(),
            segments: vec![
                TranscriptionSegment::finalized("finalized"),
                TranscriptionSegment::interim("still talk"),
            ],
        });
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn empty_and_duplicate_texts_are_skipped() {
        let mut state = SessionState::new();
        state.apply(transcription("tester", &["  "]));
        assert!(state.transcript.is_empty());

        state.apply(transcription("tester", &["same words"]));
        state.apply(transcription("tester", &["same words"]));
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].text, "same words");
    }

    #[test]
    fn console_feed_is_sorted_newest_first() {
        let mut state = SessionState::new();
        state.apply(transcription("tester", &["first line"]));
        state.apply(data(json!({"type": "tool_call", "name": "lookup"})));
        state.apply(transcription("agent-voice", &["second line"]));

        let feed = state.console_feed();
        assert_eq!(feed.len(), 3);
        for pair in feed.windows(2) {
            assert!(pair[0].timestamp() >= pair[1].timestamp());
        }
    }
}
