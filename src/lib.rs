//! Session core for the Kabaw chat clients.
//!
//! This crate owns everything the browser (`client`) and terminal (`cli`)
//! front-ends share: the JSON wire model, the validated connection address,
//! the transport seam, and the [`SessionHook`] state machine that turns raw
//! transport events into an ordered list of displayable messages.
//!
//! ARCHITECTURE
//! ============
//! The hook never touches a socket directly. Front-ends implement
//! [`Connector`] + [`Transport`] for their platform and feed every socket
//! callback back in as a [`TransportEvent`]. That keeps the state machine
//! single-owner and testable with synthetic events.

pub mod address;
pub mod config;
pub mod display;
pub mod message;
pub mod session;
pub mod transport;

pub use address::{AddressError, SessionAddress};
pub use config::ChatConfig;
pub use message::{ChatMessage, MessageError, MessageKind, OutboundMessage};
pub use session::{ConnectOutcome, SessionHook, SessionObserver, SessionPhase, SessionState};
pub use transport::{Connector, Transport, TransportError, TransportEvent, TransportId};
