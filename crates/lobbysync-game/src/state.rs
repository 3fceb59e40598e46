//! The game state slice: current game, slots, node selection and ping.

use std::collections::BTreeMap;

use lobbysync_protocol::{
    GameId, GameInfo, GameStatus, Node, NodeId, NodePingMap, PingSnapshot,
    PingStats, PlayerId, Slot, SlotClientStatus, SlotSettings, SlotStatus,
};

use crate::{GameError, NodeCatalog};

/// Every player's reported pings: player → (node key → ms).
pub type PlayerPingMaps = BTreeMap<PlayerId, NodePingMap>;

/// Client-side state for the game the local player is in.
///
/// ## Invariants
///
/// - slot indices are stable; the slot table never grows or shrinks
///   except by replacing the whole game;
/// - a player sits in at most one slot;
/// - replacing the game discards the node selection, both ping
///   structures and every flag that belonged to the old game;
/// - changing the selected node discards the ping map;
/// - events that name another game than the current one change nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub(crate) current_game: Option<GameInfo>,

    pub(crate) create_game_loading: bool,
    pub(crate) create_game_error: Option<GameError>,
    pub(crate) starting: bool,
    pub(crate) start_error: Option<GameError>,

    pub(crate) current_node_id: Option<NodeId>,
    pub(crate) current_node_loading: bool,

    pub(crate) ping_snapshot: Option<PingSnapshot>,
    pub(crate) ping_snapshot_loading: bool,
    pub(crate) current_ping_map: Option<PlayerPingMaps>,

    pub(crate) nodes: NodeCatalog,
}

impl GameState {
    /// Creates an empty game state: no game, no nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current game, but only if its id is `game_id`.
    ///
    /// This is the stale-event guard. A mismatch is logged at debug level
    /// and yields `None`, so the caller drops the event.
    fn game_mut(&mut self, game_id: GameId) -> Option<&mut GameInfo> {
        let current = self.current_game.as_ref().map(|g| g.id);
        if current != Some(game_id) {
            tracing::debug!(
                %game_id,
                current = ?current,
                "dropping event for a game we are not in"
            );
            return None;
        }
        self.current_game.as_mut()
    }

    // -- Game lifecycle ---------------------------------------------------

    /// Replaces the current game (or clears it with `None`).
    ///
    /// Not guarded: this is how a game becomes current. Everything tied
    /// to the previous game is reset, node selection included. The new
    /// game's own `node` stays on the game itself.
    pub fn replace_game(&mut self, game: Option<GameInfo>) {
        match &game {
            Some(g) => tracing::info!(game_id = %g.id, slots = g.slots.len(), "current game replaced"),
            None => tracing::info!("current game cleared"),
        }
        self.current_game = game;
        self.current_node_id = None;
        self.current_node_loading = false;
        self.current_ping_map = None;
        self.ping_snapshot = None;
        self.ping_snapshot_loading = false;
        self.create_game_loading = false;
        self.create_game_error = None;
        self.starting = false;
        self.start_error = None;
    }

    /// A create-game request went out.
    pub fn begin_create_game(&mut self) {
        self.create_game_loading = true;
        self.create_game_error = None;
    }

    /// The create-game request failed.
    pub fn fail_create_game(&mut self, error: GameError) {
        self.create_game_loading = false;
        self.create_game_error = Some(error);
    }

    /// The server is starting the game.
    pub fn set_starting(&mut self, game_id: GameId) {
        if self.game_mut(game_id).is_some() {
            self.starting = true;
            self.start_error = None;
        }
    }

    /// The game is running.
    pub fn game_started(&mut self, game_id: GameId) {
        if let Some(game) = self.game_mut(game_id) {
            game.status = GameStatus::Running;
            self.starting = false;
        }
    }

    /// Starting the game was rejected or failed.
    pub fn reject_start(&mut self, game_id: GameId, error: GameError) {
        if self.game_mut(game_id).is_some() {
            tracing::warn!(%game_id, error = %error, "game start did not go through");
            self.starting = false;
            self.start_error = Some(error);
        }
    }

    pub fn update_game_status(&mut self, game_id: GameId, status: GameStatus) {
        if let Some(game) = self.game_mut(game_id) {
            game.status = status;
        }
    }

    /// Checks the game the session claims we're in against the loaded one.
    ///
    /// - claims no game, one is loaded: we left it, clear it;
    /// - claims a different game: the loaded one is stale, clear it (the
    ///   server pushes the new game's info separately);
    /// - otherwise there is nothing to reconcile.
    pub fn reconcile_membership(&mut self, claimed: Option<GameId>) {
        let Some(loaded) = self.current_game.as_ref().map(|g| g.id) else {
            return;
        };
        if claimed != Some(loaded) {
            tracing::info!(
                %loaded,
                claimed = ?claimed,
                "session disagrees with loaded game, clearing it"
            );
            self.replace_game(None);
        }
    }

    // -- Slots ------------------------------------------------------------

    /// Overwrites one slot's settings in place.
    ///
    /// # Errors
    /// [`GameError::SlotOutOfRange`] if the current game has no such slot.
    pub fn update_slot_settings(
        &mut self,
        game_id: GameId,
        slot_index: usize,
        settings: SlotSettings,
    ) -> Result<(), GameError> {
        let Some(game) = self.game_mut(game_id) else {
            return Ok(());
        };
        slot_at(game, slot_index)?.settings = settings;
        Ok(())
    }

    /// A player took a slot. The slot is replaced wholesale.
    ///
    /// If the same player still shows up in another slot (a missed leave),
    /// that slot is opened so the player isn't seated twice.
    ///
    /// # Errors
    /// [`GameError::SlotOutOfRange`] if the current game has no such slot.
    pub fn player_enter(
        &mut self,
        game_id: GameId,
        slot_index: usize,
        slot: Slot,
    ) -> Result<(), GameError> {
        let Some(game) = self.game_mut(game_id) else {
            return Ok(());
        };
        // Check the index before touching anything else.
        slot_at(game, slot_index)?;

        if let Some(player_id) = slot.player.as_ref().map(|p| p.id) {
            for (index, other) in game.slots.iter_mut().enumerate() {
                if index != slot_index
                    && other.player.as_ref().is_some_and(|p| p.id == player_id)
                {
                    tracing::warn!(%game_id, %player_id, index, "player seated twice, opening old slot");
                    open_slot(other);
                }
            }
        }

        game.slots[slot_index] = slot;
        Ok(())
    }

    /// A player left. Their slot is emptied and reopened.
    ///
    /// A player we can't find means we missed an event. That is logged
    /// and otherwise ignored.
    pub fn player_leave(&mut self, game_id: GameId, player_id: PlayerId) {
        let Some(game) = self.game_mut(game_id) else {
            return;
        };
        match game
            .slots
            .iter_mut()
            .find(|s| s.player.as_ref().is_some_and(|p| p.id == player_id))
        {
            Some(slot) => open_slot(slot),
            None => {
                tracing::warn!(%game_id, %player_id, "leave for a player in no slot (desync)");
            }
        }
    }

    /// A player's game client moved to a new loading stage.
    pub fn update_slot_client_status(
        &mut self,
        game_id: GameId,
        player_id: PlayerId,
        status: SlotClientStatus,
    ) {
        let Some(game) = self.game_mut(game_id) else {
            return;
        };
        match game
            .slots
            .iter_mut()
            .find(|s| s.player.as_ref().is_some_and(|p| p.id == player_id))
        {
            Some(slot) => slot.client_status = status,
            None => {
                tracing::debug!(%game_id, %player_id, "client status for a player in no slot");
            }
        }
    }

    // -- Node selection ---------------------------------------------------

    /// A node selection request went out. Not guarded.
    pub fn begin_node_selection(&mut self) {
        self.current_node_id = None;
        self.current_node_loading = true;
    }

    /// The server confirmed the game's node.
    ///
    /// The ping map was measured against the old selection, so it goes.
    /// The game's node descriptor comes from the catalog when the node is
    /// listed. An unlisted node keeps the descriptor the game already had,
    /// as long as it names the same node.
    pub fn select_node(&mut self, game_id: GameId, node_id: Option<NodeId>) {
        let listed = node_id
            .and_then(|id| self.nodes.get(id))
            .map(|entry| entry.node.clone());
        let Some(game) = self.game_mut(game_id) else {
            return;
        };
        match listed {
            Some(node) => game.node = Some(node),
            None => {
                if game.node.as_ref().map(Node::node_id) != node_id {
                    game.node = None;
                }
            }
        }
        self.current_node_id = node_id;
        self.current_node_loading = false;
        self.current_ping_map = None;
    }

    // -- Node catalog -----------------------------------------------------

    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes.set_nodes(nodes);
    }

    pub fn update_node_ping(&mut self, node_id: NodeId, ping: Option<PingStats>) {
        self.nodes.update_ping(node_id, ping);
    }

    // -- Ping -------------------------------------------------------------

    /// A ping snapshot request went out.
    pub fn begin_ping_snapshot(&mut self) {
        self.ping_snapshot_loading = true;
    }

    /// Installs a ping snapshot, replacing any earlier one.
    pub fn set_ping_snapshot(&mut self, snapshot: PingSnapshot) {
        if self.game_mut(snapshot.game_id).is_none() {
            return;
        }
        self.ping_snapshot = Some(snapshot);
        self.ping_snapshot_loading = false;
    }

    /// Merges one player's ping report into the ping map.
    ///
    /// A player's first report is installed as-is; later ones overwrite
    /// the nodes they mention and leave the rest. Replaying a report is a
    /// no-op. Not guarded: reports are about nodes, not a game.
    pub fn merge_ping(&mut self, player_id: PlayerId, delta: NodePingMap) {
        let maps = self.current_ping_map.get_or_insert_with(BTreeMap::new);
        match maps.get_mut(&player_id) {
            Some(existing) => existing.extend(delta),
            None => {
                maps.insert(player_id, delta);
            }
        }
    }
}

fn slot_at(game: &mut GameInfo, index: usize) -> Result<&mut Slot, GameError> {
    let (game_id, len) = (game.id, game.slots.len());
    game.slots
        .get_mut(index)
        .ok_or(GameError::SlotOutOfRange {
            game_id,
            index,
            len,
        })
}

fn open_slot(slot: &mut Slot) {
    slot.player = None;
    slot.settings.status = SlotStatus::Open;
    slot.client_status = SlotClientStatus::Pending;
}

// =========================================================================
// Tests
// =========================================================================
