//! Error types for the game layer.

use lobbysync_protocol::GameId;

/// Errors from game state mutations, and request failures the game slice
/// keeps for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// An event named a slot index the game doesn't have. The slot table
    /// has a fixed length, so this means we are out of sync with the server.
    #[error("slot {index} out of range for game {game_id} ({len} slots)")]
    SlotOutOfRange {
        game_id: GameId,
        index: usize,
        len: usize,
    },

    /// The server refused to start the game.
    #[error("game start rejected: {0}")]
    StartRejected(String),

    /// The game failed while starting.
    #[error("game start failed: {0}")]
    StartFailed(String),

    /// Creating a game failed.
    #[error("game creation failed: {0}")]
    CreateFailed(String),
}

impl GameError {
    /// Returns `true` for errors that mean local state diverged from the
    /// server's, as opposed to a request the server turned down.
    pub fn is_desync(&self) -> bool {
        matches!(self, Self::SlotOutOfRange { .. })
    }
}
