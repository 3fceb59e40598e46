/// Errors that can occur in the transport layer.
///
/// Every link failure names the lobby server URL, since a client may hold
/// more than one connection.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection was closed by the other side or locally.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Opening the connection failed (DNS, TCP, or WebSocket upgrade).
    #[error("could not reach lobby server at {url}: {source}")]
    ConnectFailed {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Sending a frame failed.
    #[error("send to {url} failed: {source}")]
    SendFailed {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Receiving a frame failed.
    #[error("receive from {url} failed: {source}")]
    ReceiveFailed {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
