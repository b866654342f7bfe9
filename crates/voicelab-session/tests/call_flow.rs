//! End-to-end reduction of a scripted call, from a freshly minted token to
//! the final console feed.

use serde_json::json;
use voicelab_session::{RoomSession, SessionEvent, TrackKind, TranscriptionSegment};
use voicelab_token::{LiveKitConfig, TokenService};
use voicelab_types::ConnectionStatus;

fn data(value: serde_json::Value) -> SessionEvent {
    SessionEvent::DataReceived {
        payload: value.to_string().into_bytes(),
    }
}

fn finalized(speaker: &str, text: &str) -> SessionEvent {
    SessionEvent::Transcription {
        speaker: speaker.to_string(),
        segments: vec![TranscriptionSegment::finalized(text)],
    }
}

#[tokio::test]
async fn scripted_call_reduces_to_expected_state() {
    let token_service = TokenService::new(LiveKitConfig::new(
        "ws://localhost:7880",
        "devkey",
        "devsecret",
    ));
    let grant = token_service.mint(None, None).expect("mint token");

    let mut session = RoomSession::connect("ws://localhost:7880", &grant.token)
        .await
        .expect("connect");
    session.enable_microphone().await.expect("enable microphone");

    let tx = session.event_sender();
    let events = vec![
        SessionEvent::ParticipantJoined {
            identity: "agent-voice".into(),
        },
        SessionEvent::TrackSubscribed {
            sid: "TR_AGENT".into(),
            kind: TrackKind::Audio,
            participant: "agent-voice".into(),
            on_behalf_of: None,
        },
        data(json!({"type": "agent_ready"})),
        finalized("tester", "hi there"),
        finalized("agent-voice", "hello, how can I help?"),
        data(json!({
            "type": "tool_call",
            "name": "lookup_order",
            "arguments": {"order_id": "A-1009"},
            "result": "shipped"
        })),
        finalized("agent-voice", "your order has shipped"),
        data(json!({
            "type": "summary",
            "summary": "Caller asked about order A-1009; it has shipped.",
            "cost": {"total": 0.042, "breakdown": {"llm": 0.03, "stt": 0.007, "tts": 0.005}}
        })),
        data(json!({"type": "call_end"})),
    ];
    for event in events {
        tx.send(event).expect("session still draining");
    }

    session.run().await;

    let state = session.state();
    assert_eq!(state.status, ConnectionStatus::Disconnected);
    assert!(!session.is_connected());

    // Two agent utterances merged into one line; the tester's stands alone.
    assert_eq!(state.transcript.len(), 2);
    assert_eq!(state.transcript[0].speaker, "tester");
    assert_eq!(state.transcript[1].speaker, "agent-voice");
    assert_eq!(
        state.transcript[1].text,
        "hello, how can I help? your order has shipped"
    );

    assert_eq!(state.tool_calls.len(), 1);
    assert_eq!(state.tool_calls[0].name, "lookup_order");

    let summary = state.summary.as_ref().expect("summary set at call end");
    assert_eq!(summary.total, Some(0.042));
    assert_eq!(summary.breakdown.len(), 3);

    // Feed combines tool calls and transcript lines, newest first.
    assert_eq!(state.console_feed().len(), 3);
}

#[tokio::test]
async fn transport_failure_leaves_no_session() {
    // Empty room URL is the logged misconfiguration case: connect aborts
    // before any state exists.
    let result = RoomSession::connect("", "jwt").await;
    assert!(result.is_err());
}
