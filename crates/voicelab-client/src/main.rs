//! Voicelab demo client — a terminal stand-in for the web UI.
//!
//! Fetches a join token from the token service, opens a room session, and
//! reduces room events into the console feed the web page would render.
//! The media SDK is not embedded here; inbound data-channel payloads are
//! read as JSON lines from stdin, which exercises the same dispatch path
//! the web client uses for messages arriving over the room's side channel.
//!
//! Environment:
//! - `VOICELAB_API_BASE` — base URL of the token service (default empty).
//! - `LIVEKIT_URL` — room server URL handed to the session (default empty;
//!   an empty value is logged as a misconfiguration).

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use voicelab_session::{FeedItem, RoomSession, SessionEvent, TokenClient};
use voicelab_types::Severity;

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let api_base = env_or_empty("VOICELAB_API_BASE");
    let room_url = env_or_empty("LIVEKIT_URL");
    if room_url.is_empty() {
        tracing::warn!("LIVEKIT_URL is not set — the room URL is empty, connect will fail");
    }

    // Connect sequence: token fetch, room connect, microphone enable. A
    // failure at any step aborts the rest and leaves us disconnected.
    let token_client = TokenClient::new(api_base);
    let grant = match token_client.fetch(Some(room_url.as_str())).await {
        Ok(grant) => grant,
        Err(e) => {
            tracing::error!("token fetch failed: {e}");
            return;
        }
    };

    let mut session = match RoomSession::connect(&room_url, &grant.token).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("room connect failed: {e}");
            return;
        }
    };

    if let Err(e) = session.enable_microphone().await {
        tracing::error!("microphone enable failed: {e}");
        session.disconnect();
        return;
    }

    tracing::info!(room = %grant.room, identity = %grant.identity, "session established");

    // Feed stdin lines into the session as data-channel payloads.
    let events = session.event_sender();
    let stdin_pump = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            if events
                .send(SessionEvent::DataReceived {
                    payload: line.into_bytes(),
                })
                .is_err()
            {
                break;
            }
        }
    });

    tokio::select! {
        _ = session.run() => {
            tracing::info!("session ended");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received SIGINT, disconnecting");
        }
    }
    stdin_pump.abort();
    session.disconnect();

    render_state(&session);
}

/// Prints the accumulated state the way the web page renders it: console
/// feed newest-first, then the cost breakdown, then the raw log lines.
fn render_state(session: &RoomSession) {
    let state = session.state();

    println!("\n=== Console feed ===");
    for item in state.console_feed() {
        match item {
            FeedItem::ToolCall(record) => {
                let result = record.result.as_deref().unwrap_or("(pending)");
                println!(
                    "[tool] {}({}) -> {result}",
                    record.name, record.arguments
                );
            }
            FeedItem::Transcript(entry) => {
                println!("[{}] {}", entry.speaker, entry.text);
            }
        }
    }

    if let Some(summary) = &state.summary {
        println!("\n=== Call summary ===");
        println!("{}", summary.text);
        if let Some(total) = summary.total {
            println!("total: ${total:.4}");
        }
        for (component, amount) in &summary.breakdown {
            println!("  {component}: ${amount:.4}");
        }
    }

    println!("\n=== Log ===");
    for entry in &state.logs {
        let tag = match entry.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Error => "err",
        };
        println!("[{tag}] {}", entry.message);
    }
}
