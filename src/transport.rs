//! Transport seam between the session hook and a platform socket.
//!
//! A [`Connector`] opens one [`Transport`] per session. The platform side
//! reports every socket callback back to the hook as a [`TransportEvent`]
//! tagged with the [`TransportId`] it was opened under, so events from a
//! torn-down socket can be told apart from the live one.

use std::fmt;

use crate::address::SessionAddress;

/// Identity of one transport instance within a hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransportId(pub u64);

impl fmt::Display for TransportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport-{}", self.0)
    }
}

/// Socket callbacks, reduced to a closed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    /// The socket finished its handshake and can carry frames.
    Opened,
    /// One inbound text frame, not yet decoded.
    MessageReceived(String),
    /// The socket is gone, whether closed remotely or locally.
    Closed,
    /// The socket reported an error. A `Closed` normally follows.
    Errored,
}

/// Error surfaced by a transport or connector.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("failed to open transport: {0}")]
    Open(String),
    #[error("failed to send frame: {0}")]
    Send(String),
    #[error("transport is closed")]
    Closed,
}

/// An open (or opening) message-oriented connection.
pub trait Transport {
    /// Queue one text frame for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the frame cannot be handed to the socket.
    fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    /// Ask the socket to close. Must be safe to call more than once.
    fn close(&mut self);
}

/// Factory for transports; platform code owns the actual socket.
pub trait Connector {
    type Transport: Transport;

    /// Start opening a transport to `address`.
    ///
    /// Implementations report later lifecycle changes as [`TransportEvent`]s
    /// tagged with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] when the socket cannot even be created.
    fn open(&self, address: &SessionAddress, id: TransportId) -> Result<Self::Transport, TransportError>;
}
