//! Wire schema for inbound data-channel messages.
//!
//! The agent sends application-level JSON payloads over the room's data
//! channel, discriminated by a `type` field. Anything that fails to decode
//! as UTF-8 JSON, or carries an unknown `type`, is not an error for the
//! session: the client downgrades it to an informational log line.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cost information attached to a `summary` message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostPayload {
    /// Total cost across all components.
    pub total: Option<f64>,
    /// Per-component breakdown (e.g. "llm", "tts", "stt").
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
}

/// An inbound data-channel message, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataMessage {
    /// The agent invoked a tool and reports the call (and optionally its
    /// result).
    ToolCall {
        name: String,
        #[serde(default)]
        arguments: serde_json::Value,
        #[serde(default)]
        result: Option<String>,
    },
    /// End-of-call summary, optionally with a cost breakdown.
    Summary {
        #[serde(default)]
        summary: String,
        #[serde(default)]
        cost: Option<CostPayload>,
    },
    /// The agent signals it is ready to converse.
    AgentReady,
    /// The agent ends the call; the client must disconnect.
    CallEnd,
}

impl DataMessage {
    /// Decodes a raw data-channel payload (UTF-8 JSON).
    ///
    /// Returns `None` for anything that is not valid UTF-8, not valid JSON,
    /// or not a recognized message type. Callers treat `None` as "log and
    /// ignore", never as a failure.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(payload).ok()?;
        serde_json::from_str(text).ok()
    }
}
