//! The single owned room-session handle.
//!
//! Wraps the connection lifecycle around the [`SessionState`] reducer. The
//! external SDK owns media transport and track negotiation; its transport
//! adapter delivers [`SessionEvent`]s through the channel returned by
//! [`RoomSession::event_sender`], and the session folds them into state
//! one at a time.

use crate::error::SessionError;
use crate::event::SessionEvent;
use crate::state::{SessionCommand, SessionState};
use tokio::sync::mpsc;
use tracing::{info, warn};
use voicelab_types::{ConnectionStatus, Severity};

/// A client's connection to one room.
///
/// Explicitly owned, single instance; `disconnect` is the sole teardown
/// path. There is no reconnection: once disconnected, a fresh
/// user-initiated connect builds a new session.
#[derive(Debug)]
pub struct RoomSession {
    room_url: String,
    token: String,
    connected: bool,
    microphone_enabled: bool,
    state: SessionState,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<SessionEvent>>,
}

impl RoomSession {
    /// Connects to a room.
    ///
    /// The connect action runs its steps sequentially; a failure here
    /// leaves no session behind, so the caller's status stays
    /// disconnected.
    pub async fn connect(room_url: &str, token: &str) -> Result<Self, SessionError> {
        if room_url.is_empty() {
            return Err(SessionError::Misconfigured(
                "room URL is not set".to_string(),
            ));
        }

        info!(
            url = room_url,
            token_len = token.len(),
            "connecting to room"
        );

        let (tx, rx) = mpsc::unbounded_channel();

        let mut state = SessionState::new();
        state.status = ConnectionStatus::Connecting;
        state.apply(SessionEvent::Connected);

        Ok(Self {
            room_url: room_url.to_string(),
            token: token.to_string(),
            connected: true,
            microphone_enabled: false,
            state,
            events_tx: tx,
            events_rx: Some(rx),
        })
    }

    pub fn room_url(&self) -> &str {
        &self.room_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_microphone_enabled(&self) -> bool {
        self.microphone_enabled
    }

    /// Accumulated displayable state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Sender half of the event channel, for the transport adapter.
    pub fn event_sender(&self) -> mpsc::UnboundedSender<SessionEvent> {
        self.events_tx.clone()
    }

    /// Enables the local microphone track.
    ///
    /// Awaited as the last step of the connect action; fails when the
    /// session is no longer connected.
    pub async fn enable_microphone(&mut self) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        info!(room = %self.room_url, "microphone enabled");
        self.microphone_enabled = true;
        Ok(())
    }

    /// Folds one event into the session state and executes any requested
    /// side effect.
    pub fn handle_event(&mut self, event: SessionEvent) {
        if let SessionEvent::Disconnected = event {
            // A lost connection forces teardown regardless of who noticed
            // first.
            self.connected = false;
            self.microphone_enabled = false;
        }
        match self.state.apply(event) {
            Some(SessionCommand::Disconnect) => self.disconnect(),
            None => {}
        }
    }

    /// Disconnects from the room. Idempotent: repeated calls (including a
    /// redelivered `call_end`) do nothing once torn down.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        info!(room = %self.room_url, "disconnecting from room");
        self.connected = false;
        self.microphone_enabled = false;
        self.state.apply(SessionEvent::Disconnected);
    }

    /// Drains the event channel until the session disconnects or the
    /// channel closes.
    pub async fn run(&mut self) {
        let Some(mut rx) = self.events_rx.take() else {
            warn!("session event loop already consumed");
            return;
        };
        while let Some(event) = rx.recv().await {
            self.handle_event(event);
            if !self.connected {
                break;
            }
        }
    }

    /// Adds a client-local log line (e.g. for connect-step failures that
    /// happen outside the event stream).
    pub fn log(&mut self, message: impl Into<String>, severity: Severity) {
        self.state.log(message, severity);
    }
}
