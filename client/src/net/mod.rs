//! Network layer: the browser WebSocket transport and the session handle
//! components use to drive it.

pub mod browser_transport;
pub mod session;
