//! Mutations the game slice accepts as values.

use lobbysync_protocol::{
    GameId, GameInfo, GameStatus, Node, NodeId, NodePingMap, PingSnapshot,
    PingStats, PlayerId, Slot, SlotClientStatus, SlotSettings,
};

use crate::{GameError, GameState};

/// One mutation of [`GameState`].
///
/// Variants carrying a `game_id` go through the game id guard when
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    ReplaceGame(Option<GameInfo>),
    PlayerEnter {
        game_id: GameId,
        slot_index: usize,
        slot: Slot,
    },
    PlayerLeave {
        game_id: GameId,
        player_id: PlayerId,
    },
    UpdateSlotSettings {
        game_id: GameId,
        slot_index: usize,
        settings: SlotSettings,
    },
    SelectNode {
        game_id: GameId,
        node_id: Option<NodeId>,
    },
    Starting {
        game_id: GameId,
    },
    Started {
        game_id: GameId,
    },
    /// Covers both a refused start and one that failed midway; the error
    /// variant tells them apart.
    RejectStart {
        game_id: GameId,
        error: GameError,
    },
    UpdateSlotClientStatus {
        game_id: GameId,
        player_id: PlayerId,
        status: SlotClientStatus,
    },
    UpdateGameStatus {
        game_id: GameId,
        status: GameStatus,
    },
    SetNodes(Vec<Node>),
    UpdateNodePing {
        node_id: NodeId,
        ping: Option<PingStats>,
    },
    SetPingSnapshot(PingSnapshot),
    MergePing {
        player_id: PlayerId,
        delta: NodePingMap,
    },
    /// Check the session's claimed game against the loaded one.
    ReconcileMembership {
        claimed: Option<GameId>,
    },
}

impl GameState {
    /// Applies one action.
    ///
    /// # Errors
    /// Only slot updates can fail, with [`GameError::SlotOutOfRange`].
    /// State is left untouched when they do.
    pub fn apply(&mut self, action: GameAction) -> Result<(), GameError> {
        match action {
            GameAction::ReplaceGame(game) => self.replace_game(game),
            GameAction::PlayerEnter {
                game_id,
                slot_index,
                slot,
            } => self.player_enter(game_id, slot_index, slot)?,
            GameAction::PlayerLeave { game_id, player_id } => {
                self.player_leave(game_id, player_id);
            }
            GameAction::UpdateSlotSettings {
                game_id,
                slot_index,
                settings,
            } => self.update_slot_settings(game_id, slot_index, settings)?,
            GameAction::SelectNode { game_id, node_id } => {
                self.select_node(game_id, node_id);
            }
            GameAction::Starting { game_id } => self.set_starting(game_id),
            GameAction::Started { game_id } => self.game_started(game_id),
            GameAction::RejectStart { game_id, error } => {
                self.reject_start(game_id, error);
            }
            GameAction::UpdateSlotClientStatus {
                game_id,
                player_id,
                status,
            } => self.update_slot_client_status(game_id, player_id, status),
            GameAction::UpdateGameStatus { game_id, status } => {
                self.update_game_status(game_id, status);
            }
            GameAction::SetNodes(nodes) => self.set_nodes(nodes),
            GameAction::UpdateNodePing { node_id, ping } => {
                self.update_node_ping(node_id, ping);
            }
            GameAction::SetPingSnapshot(snapshot) => {
                self.set_ping_snapshot(snapshot);
            }
            GameAction::MergePing { player_id, delta } => {
                self.merge_ping(player_id, delta);
            }
            GameAction::ReconcileMembership { claimed } => {
                self.reconcile_membership(claimed);
            }
        }
        Ok(())
    }
}
