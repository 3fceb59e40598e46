//! Unified error type for Lobbysync.

use lobbysync_game::GameError;
use lobbysync_protocol::ProtocolError;
use lobbysync_transport::TransportError;

/// Top-level error that wraps the crate-specific errors.
///
/// Errors stored *in* state (`ConnectionError`, a rejected game start)
/// are not here: those are values the UI shows, not failures of a call.
#[derive(Debug, thiserror::Error)]
pub enum LobbysyncError {
    /// Opening or using the WebSocket failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A message could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A game state mutation was rejected.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The [`Connection`](lobbysync_transport::Connection) implementation
    /// failed. Its error type is generic, so it is boxed here.
    #[error("connection failed: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No frame arrived within the configured receive timeout.
    #[error("no message from server for {0:?}")]
    Timeout(std::time::Duration),
}
