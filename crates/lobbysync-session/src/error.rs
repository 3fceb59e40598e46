//! Errors recorded in connection state.

use lobbysync_protocol::DisconnectReason;

/// An error the connection slice stores for the UI to show.
///
/// These are values, not control flow: a rejected connect lands in
/// `player_session_error` and stays there until the next attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The server refused our `Connect` request.
    #[error("connect rejected: {0}")]
    Rejected(String),

    /// The server told us it is dropping the link.
    #[error("disconnected ({reason}): {message}")]
    Disconnected {
        reason: DisconnectReason,
        message: String,
    },

    /// The link failed underneath us (socket error, unexpected close).
    #[error("transport error: {0}")]
    Transport(String),

    /// A request-response exchange failed on the server side.
    #[error("request failed: {0}")]
    Request(String),
}
