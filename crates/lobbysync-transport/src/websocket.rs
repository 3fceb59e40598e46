//! WebSocket client connection using `tokio-tungstenite`.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::{Connection, ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// A WebSocket connection to the lobby server.
///
/// The stream sits behind a `Mutex` so `send` and `recv` can be called
/// through a shared reference. Errors carry the URL the connection was
/// opened with.
pub struct WebSocketConnection {
    id: ConnectionId,
    url: String,
    ws: Arc<Mutex<WsStream>>,
}

impl WebSocketConnection {
    /// Opens a WebSocket connection to `url` (`ws://` or `wss://`).
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let (ws, _response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| TransportError::ConnectFailed {
                url: url.to_string(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, e),
            })?;

        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        tracing::debug!(%id, url, "opened lobby connection");

        Ok(Self {
            id,
            url: url.to_string(),
            ws: Arc::new(Mutex::new(ws)),
        })
    }

    /// The URL this connection was opened with.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn send_failed(&self, e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> TransportError {
        TransportError::SendFailed {
            url: self.url.clone(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, e),
        }
    }
}

/// Wraps an outbound payload in a frame.
///
/// The lobby server speaks JSON over text frames, so valid UTF-8 goes out
/// as text. Anything else is sent as a binary frame.
fn outbound_frame(data: &[u8]) -> Message {
    match std::str::from_utf8(data) {
        Ok(text) => Message::Text(text.to_owned().into()),
        Err(_) => Message::Binary(data.to_vec().into()),
    }
}

impl Connection for WebSocketConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let frame = outbound_frame(data);
        self.ws
            .lock()
            .await
            .send(frame)
            .await
            .map_err(|e| self.send_failed(e))
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        loop {
            let frame = self.ws.lock().await.next().await;
            match frame {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(data.into()));
                }
                Some(Ok(Message::Close(close))) => {
                    tracing::debug!(id = %self.id, ?close, "lobby server closed the connection");
                    return Ok(None);
                }
                None => return Ok(None),
                // Pings are answered by tungstenite itself.
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed {
                        url: self.url.clone(),
                        source: io::Error::new(io::ErrorKind::ConnectionReset, e),
                    });
                }
            }
        }
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.ws
            .lock()
            .await
            .close(None)
            .await
            .map_err(|e| self.send_failed(e))
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
