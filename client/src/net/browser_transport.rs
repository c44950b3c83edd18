//! Browser WebSocket transport built on `gloo-net`.
//!
//! Each connection runs as one local task that waits for the handshake,
//! then pumps inbound frames to the event sink and outbound frames from an
//! unbounded channel to the socket. Socket work is gated behind
//! `#[cfg(feature = "csr")]` since it requires a browser environment;
//! elsewhere `open` fails with a transport error.
//!
//! ERROR HANDLING
//! ==============
//! Nothing is retried. Socket errors become `Errored`, and the end of either
//! pump becomes `Closed`; the session hook decides what the user sees.

use std::rc::Rc;

use futures::channel::mpsc;

use kabaw_chat::{Connector, SessionAddress, Transport, TransportError, TransportEvent, TransportId};

/// Callback receiving every lifecycle event, tagged with its transport.
pub type EventSink = Rc<dyn Fn(TransportId, TransportEvent)>;

/// Commands queued for the socket task.
#[derive(Debug)]
enum Outgoing {
    Text(String),
    Close,
}

/// Sending half of one browser socket.
pub struct BrowserTransport {
    outgoing: mpsc::UnboundedSender<Outgoing>,
}

impl Transport for BrowserTransport {
    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.outgoing.unbounded_send(Outgoing::Text(text)).map_err(|_| TransportError::Closed)
    }

    fn close(&mut self) {
        if self.outgoing.unbounded_send(Outgoing::Close).is_err() {
            leptos::logging::log!("socket task already finished");
        }
    }
}

/// Opens `gloo-net` sockets and reports their events to one sink.
pub struct BrowserConnector {
    events: EventSink,
}

impl BrowserConnector {
    pub fn new(events: impl Fn(TransportId, TransportEvent) + 'static) -> Self {
        Self { events: Rc::new(events) }
    }
}

impl Connector for BrowserConnector {
    type Transport = BrowserTransport;

    #[cfg(feature = "csr")]
    fn open(&self, address: &SessionAddress, id: TransportId) -> Result<BrowserTransport, TransportError> {
        let ws = gloo_net::websocket::futures::WebSocket::open(address.url().as_str())
            .map_err(|e| TransportError::Open(e.to_string()))?;
        let (tx, rx) = mpsc::unbounded();

        leptos::task::spawn_local(run_socket(ws, id, rx, Rc::clone(&self.events)));

        Ok(BrowserTransport { outgoing: tx })
    }

    #[cfg(not(feature = "csr"))]
    fn open(&self, address: &SessionAddress, id: TransportId) -> Result<BrowserTransport, TransportError> {
        leptos::logging::warn!("{id}: no browser socket available for {address}");
        Err(TransportError::Open("browser WebSocket requires the csr feature".to_owned()))
    }
}

#[cfg(feature = "csr")]
const OPEN_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(25);

/// Drive one socket until either side finishes, then report `Closed`.
#[cfg(feature = "csr")]
async fn run_socket(
    ws: gloo_net::websocket::futures::WebSocket,
    id: TransportId,
    mut outgoing: mpsc::UnboundedReceiver<Outgoing>,
    events: EventSink,
) {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::{Message, State, WebSocketError};

    while ws.state() == State::Connecting {
        gloo_timers::future::sleep(OPEN_POLL_INTERVAL).await;
    }
    if ws.state() == State::Open {
        events(id, TransportEvent::Opened);
    }

    let (mut sink, mut stream) = ws.split();

    let recv_task = async {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Text(text)) => events(id, TransportEvent::MessageReceived(text)),
                Ok(Message::Bytes(bytes)) => {
                    leptos::logging::warn!("{id}: ignoring {} byte binary frame", bytes.len());
                }
                Err(WebSocketError::ConnectionClose(close)) => {
                    leptos::logging::log!("{id}: closed with code {}", close.code);
                    break;
                }
                Err(WebSocketError::ConnectionError) => events(id, TransportEvent::Errored),
                Err(e) => {
                    leptos::logging::warn!("{id}: socket error: {e}");
                    events(id, TransportEvent::Errored);
                }
            }
        }
    };

    let send_task = async {
        while let Some(command) = outgoing.next().await {
            match command {
                Outgoing::Text(text) => {
                    if let Err(e) = sink.send(Message::Text(text)).await {
                        leptos::logging::warn!("{id}: send failed: {e}");
                        break;
                    }
                }
                Outgoing::Close => break,
            }
        }
        if let Err(e) = sink.close().await {
            leptos::logging::log!("{id}: close failed: {e}");
        }
    };

    futures::future::select(Box::pin(recv_task), Box::pin(send_task)).await;
    events(id, TransportEvent::Closed);
}
