//! Shared types and constants for the Voicelab demo stack.
//!
//! This crate provides the foundational types used across all Voicelab
//! crates: the records the client accumulates while a call is running
//! (logs, tool calls, transcript lines, cost summary), the connection
//! status model, and the wire schema for inbound data-channel messages.
//!
//! No crate in the workspace depends on anything *except* `voicelab-types`
//! for cross-cutting type definitions. This keeps the dependency graph
//! clean and prevents circular dependencies.

pub mod message;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use message::{CostPayload, DataMessage};

/// Identity prefix used by agent participants.
///
/// The voice agent joins the room with an identity of the form
/// `agent-<suffix>`; the client uses this prefix to detect when the agent's
/// audio track is live or when the agent has spoken.
pub const AGENT_IDENTITY_PREFIX: &str = "agent";

/// Returns true if a participant identity belongs to the voice agent.
pub fn is_agent_identity(identity: &str) -> bool {
    identity.starts_with(AGENT_IDENTITY_PREFIX)
}

/// Connection status of the client's room session.
///
/// The only legal transitions are `Disconnected → Connecting → Connected →
/// Disconnected`. There is no reconnection: a dropped session requires a
/// fresh user-initiated connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Severity of a client-local log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A client-local log line.
///
/// Append-only and unbounded; cleared only by starting a fresh session
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            timestamp: Utc::now(),
        }
    }
}

/// A record of a tool call reported by the agent over the data channel.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub id: Uuid,
    pub name: String,
    pub arguments: serde_json::Value,
    pub result: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ToolCallRecord {
    pub fn new(
        name: impl Into<String>,
        arguments: serde_json::Value,
        result: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            arguments,
            result,
            timestamp: Utc::now(),
        }
    }
}

/// A finalized transcript line attributed to one speaker.
///
/// Consecutive finalized utterances from the same most-recent speaker are
/// merged into the existing entry rather than appended as new lines; a new
/// entry is only created when the speaker changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub speaker: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: speaker.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// End-of-call summary with an optional cost breakdown.
///
/// Set once from the trailing `summary` data message; a later message
/// overwrites any prior value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSummary {
    /// Human-readable summary text.
    pub text: String,
    /// Total cost across all components, if reported.
    pub total: Option<f64>,
    /// Per-component cost breakdown (component label → amount).
    #[serde(default)]
    pub breakdown: std::collections::BTreeMap<String, f64>,
}

/// Response body of the token-issuance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub token: String,
    pub identity: String,
    pub room: String,
}
