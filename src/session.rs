//! Session hook: one transport slot, one ordered message list.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front-ends own a `SessionHook` and call it from a single event loop:
//! user actions (`connect`, `send_message`, `disconnect`, `retarget`) and
//! transport callbacks (`handle`) are never interleaved. Observers are told
//! about every state change so the view can re-render.
//!
//! LIFECYCLE
//! =========
//! `Idle -> Connecting -> Open -> Closed`, per transport instance. `Closed`
//! is terminal; a new `connect` opens a fresh instance with a new
//! [`TransportId`]. Nothing reconnects on its own.
//!
//! ERROR HANDLING
//! ==============
//! No failure escapes as an error. Transport errors and closes become
//! visible system notices, malformed payloads and sends without a socket are
//! logged and dropped.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::address::SessionAddress;
use crate::message::{ChatMessage, MessageKind, OutboundMessage, decode_message, encode_outbound};
use crate::transport::{Connector, Transport, TransportEvent, TransportId};

pub const NOTICE_DISCONNECTED: &str = "Connection disconnected";
pub const NOTICE_ERROR: &str = "Connection error";

/// Where the current (or most recent) transport is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// No transport has been requested yet.
    #[default]
    Idle,
    /// A transport was requested and has not opened.
    Connecting,
    /// The transport is open.
    Open,
    /// The last transport closed or was torn down.
    Closed,
}

/// Everything a view needs to render the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Messages of the current session, in delivery order.
    pub messages: Vec<ChatMessage>,
    /// Whether the transport is open.
    pub connected: bool,
    /// Server-assigned ID from the first `user_connected` of this session.
    pub current_user_id: Option<String>,
    pub phase: SessionPhase,
}

impl SessionState {
    /// Whether `message` was sent by the local user.
    #[must_use]
    pub fn is_own(&self, message: &ChatMessage) -> bool {
        message.is_own(self.current_user_id.as_deref())
    }
}

/// Receives state snapshots from a [`SessionHook`].
pub trait SessionObserver {
    /// Called after every transition that changed [`SessionState`].
    fn on_state_changed(&mut self, state: &SessionState);

    /// Called after the transport closed on its own (remote close, failed
    /// open). Not called for [`SessionHook::disconnect`].
    fn on_disconnected(&mut self) {}
}

/// Result of [`SessionHook::connect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new transport is opening under this ID.
    Started(TransportId),
    /// A transport already occupies the slot; nothing was opened.
    AlreadyActive,
    /// The connector could not create a transport.
    Failed,
}

struct ActiveTransport<T> {
    id: TransportId,
    address: SessionAddress,
    transport: T,
}

/// Owns at most one transport and the message list it feeds.
pub struct SessionHook<T: Transport> {
    state: SessionState,
    slot: Option<ActiveTransport<T>>,
    next_id: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl<T: Transport> Default for SessionHook<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> SessionHook<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            slot: None,
            next_id: 0,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_own(&self, message: &ChatMessage) -> bool {
        self.state.is_own(message)
    }

    /// Address of the transport currently in the slot.
    #[must_use]
    pub fn address(&self) -> Option<&SessionAddress> {
        self.slot.as_ref().map(|active| &active.address)
    }

    /// ID of the transport currently in the slot.
    #[must_use]
    pub fn active_transport(&self) -> Option<TransportId> {
        self.slot.as_ref().map(|active| active.id)
    }

    /// Open a transport to `address` unless one is already active.
    pub fn connect<C>(&mut self, connector: &C, address: SessionAddress) -> ConnectOutcome
    where
        C: Connector<Transport = T>,
    {
        if let Some(active) = &self.slot {
            tracing::debug!(transport = %active.id, "connect ignored; transport already active");
            return ConnectOutcome::AlreadyActive;
        }

        self.next_id += 1;
        let id = TransportId(self.next_id);
        tracing::info!(transport = %id, url = %address, "opening chat transport");

        match connector.open(&address, id) {
            Ok(transport) => {
                self.slot = Some(ActiveTransport { id, address, transport });
                self.state.phase = SessionPhase::Connecting;
                self.notify();
                ConnectOutcome::Started(id)
            }
            Err(error) => {
                tracing::warn!(transport = %id, %error, "chat transport failed to open");
                self.apply_error();
                self.apply_close();
                ConnectOutcome::Failed
            }
        }
    }

    /// Point the session at `target`, replacing the transport if it changed.
    ///
    /// `None` tears the session down. Returns the connect outcome when a
    /// target was given.
    pub fn retarget<C>(&mut self, connector: &C, target: Option<SessionAddress>) -> Option<ConnectOutcome>
    where
        C: Connector<Transport = T>,
    {
        let Some(address) = target else {
            self.disconnect();
            return None;
        };

        if self.address() == Some(&address) {
            return Some(ConnectOutcome::AlreadyActive);
        }

        self.disconnect();
        Some(self.connect(connector, address))
    }

    /// Apply one transport callback. Returns whether state changed.
    pub fn handle(&mut self, id: TransportId, event: TransportEvent) -> bool {
        if self.active_transport() != Some(id) {
            tracing::debug!(transport = %id, ?event, "ignoring event from stale transport");
            return false;
        }

        match event {
            TransportEvent::Opened => self.apply_open(),
            TransportEvent::MessageReceived(raw) => self.apply_message(&raw),
            TransportEvent::Closed => {
                self.apply_close();
                true
            }
            TransportEvent::Errored => {
                self.apply_error();
                true
            }
        }
    }

    /// Best-effort send. Returns `false` (and logs) when nothing is open.
    ///
    /// The message is not appended locally; it shows up when the server
    /// echoes it back.
    pub fn send_message(&mut self, content: &str) -> bool {
        let open = self.state.connected && self.state.phase == SessionPhase::Open;
        let Some(active) = self.slot.as_mut().filter(|_| open) else {
            tracing::warn!("cannot send message; no open transport");
            return false;
        };

        let payload = match encode_outbound(&OutboundMessage::chat(content)) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, "dropping unencodable chat message");
                return false;
            }
        };

        match active.transport.send_text(payload) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(transport = %active.id, %error, "chat message send failed");
                false
            }
        }
    }

    /// Close the active transport now. Returns `false` if none was active.
    ///
    /// State flips to disconnected immediately; the close event the socket
    /// fires afterwards is stale and ignored.
    pub fn disconnect(&mut self) -> bool {
        let Some(mut active) = self.slot.take() else {
            return false;
        };

        tracing::info!(transport = %active.id, "disconnecting chat transport");
        active.transport.close();
        self.state.connected = false;
        self.state.phase = SessionPhase::Closed;
        self.state.messages.push(ChatMessage::system_notice(NOTICE_DISCONNECTED));
        self.notify();
        true
    }

    fn apply_open(&mut self) -> bool {
        if self.state.phase != SessionPhase::Connecting {
            tracing::debug!(phase = ?self.state.phase, "ignoring repeated open");
            return false;
        }
        let Some(active) = &self.slot else {
            return false;
        };

        let notice = format!(
            "Connected as {} to channel {}",
            active.address.username(),
            active.address.channel()
        );
        tracing::info!(transport = %active.id, "chat transport open");

        self.state.messages.clear();
        self.state.current_user_id = None;
        self.state.connected = true;
        self.state.phase = SessionPhase::Open;
        self.state.messages.push(ChatMessage::system_notice(notice));
        self.notify();
        true
    }

    fn apply_message(&mut self, raw: &str) -> bool {
        if self.state.phase != SessionPhase::Open {
            tracing::warn!(phase = ?self.state.phase, "dropping chat payload received before open");
            return false;
        }

        let message = match decode_message(raw) {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(%error, "dropping malformed chat payload");
                return false;
            }
        };

        if message.kind == MessageKind::UserConnected
            && self.state.current_user_id.is_none()
            && let Some(user_id) = message.user_id.clone()
        {
            tracing::info!(%user_id, "server assigned user id");
            self.state
                .messages
                .push(ChatMessage::system_notice(format!("Your user ID: {user_id}")));
            self.state.current_user_id = Some(user_id);
        }

        self.state.messages.push(message);
        self.notify();
        true
    }

    fn apply_close(&mut self) {
        if let Some(mut active) = self.slot.take() {
            tracing::info!(transport = %active.id, "chat transport closed");
            active.transport.close();
        }

        self.state.connected = false;
        self.state.phase = SessionPhase::Closed;
        self.state.messages.push(ChatMessage::system_notice(NOTICE_DISCONNECTED));
        self.notify();

        for observer in &mut self.observers {
            observer.on_disconnected();
        }
    }

    fn apply_error(&mut self) {
        self.state.connected = false;
        self.state.messages.push(ChatMessage::system_notice(NOTICE_ERROR));
        self.notify();
    }

    fn notify(&mut self) {
        let state = &self.state;
        for observer in &mut self.observers {
            observer.on_state_changed(state);
        }
    }
}
