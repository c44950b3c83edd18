//! `tokio-tungstenite` transport: one task per connection.
//!
//! The task owns the socket. The session hook holds only the sending half of
//! a command channel, and every socket callback comes back to the main loop
//! over the shared event channel tagged with its `TransportId`.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use kabaw_chat::{Connector, SessionAddress, Transport, TransportError, TransportEvent, TransportId};

pub type EventSender = mpsc::UnboundedSender<(TransportId, TransportEvent)>;
pub type EventReceiver = mpsc::UnboundedReceiver<(TransportId, TransportEvent)>;

/// Drain `events` until transport `id` reports `Closed`.
///
/// Closes from other transports are skipped. Returns early if every sender
/// is gone.
pub async fn wait_for_close(events: &mut EventReceiver, id: TransportId) {
    while let Some((from, event)) = events.recv().await {
        if from == id && event == TransportEvent::Closed {
            return;
        }
    }
}

#[derive(Debug)]
enum Outgoing {
    Text(String),
    Close,
}

pub struct WsTransport {
    outgoing: mpsc::UnboundedSender<Outgoing>,
}

impl Transport for WsTransport {
    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.outgoing.send(Outgoing::Text(text)).map_err(|_| TransportError::Closed)
    }

    fn close(&mut self) {
        if self.outgoing.send(Outgoing::Close).is_err() {
            tracing::debug!("socket task already finished");
        }
    }
}

pub struct WsConnector {
    events: EventSender,
}

impl WsConnector {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

impl Connector for WsConnector {
    type Transport = WsTransport;

    fn open(&self, address: &SessionAddress, id: TransportId) -> Result<WsTransport, TransportError> {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_socket(address.url().to_string(), id, rx, self.events.clone()));
        Ok(WsTransport { outgoing: tx })
    }
}

async fn run_socket(url: String, id: TransportId, mut outgoing: mpsc::UnboundedReceiver<Outgoing>, events: EventSender) {
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(error) => {
            tracing::warn!(transport = %id, %error, "websocket connect failed");
            emit(&events, id, TransportEvent::Errored);
            emit(&events, id, TransportEvent::Closed);
            return;
        }
    };
    emit(&events, id, TransportEvent::Opened);

    let (mut sink, mut stream) = stream.split();
    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    emit(&events, id, TransportEvent::MessageReceived(text.as_str().to_owned()));
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(transport = %id, ?frame, "server closed websocket");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    tracing::warn!(transport = %id, %error, "websocket receive failed");
                    emit(&events, id, TransportEvent::Errored);
                    break;
                }
                None => break,
            },
            command = outgoing.recv() => match command {
                Some(Outgoing::Text(text)) => {
                    if let Err(error) = sink.send(Message::Text(text.into())).await {
                        tracing::warn!(transport = %id, %error, "websocket send failed");
                        emit(&events, id, TransportEvent::Errored);
                        break;
                    }
                }
                Some(Outgoing::Close) | None => {
                    if let Err(error) = sink.close().await {
                        tracing::debug!(transport = %id, %error, "websocket close failed");
                    }
                    break;
                }
            },
        }
    }
    emit(&events, id, TransportEvent::Closed);
}

fn emit(events: &EventSender, id: TransportId, event: TransportEvent) {
    if events.send((id, event)).is_err() {
        tracing::debug!(transport = %id, "event loop gone; dropping transport event");
    }
}
