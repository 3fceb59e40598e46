//! Read access to [`GameState`] and views derived from it.

use std::collections::BTreeMap;

use lobbysync_protocol::{
    GameInfo, NodeId, PingSnapshot, PlayerId, PlayerInfo,
};

use crate::{GameError, GameState, NodeCatalog, NodeEntry, PlayerPingMaps};

impl GameState {
    pub fn current_game(&self) -> Option<&GameInfo> {
        self.current_game.as_ref()
    }

    pub fn create_game_loading(&self) -> bool {
        self.create_game_loading
    }

    pub fn create_game_error(&self) -> Option<&GameError> {
        self.create_game_error.as_ref()
    }

    pub fn starting(&self) -> bool {
        self.starting
    }

    pub fn start_error(&self) -> Option<&GameError> {
        self.start_error.as_ref()
    }

    pub fn current_node_id(&self) -> Option<NodeId> {
        self.current_node_id
    }

    pub fn current_node_loading(&self) -> bool {
        self.current_node_loading
    }

    pub fn ping_snapshot(&self) -> Option<&PingSnapshot> {
        self.ping_snapshot.as_ref()
    }

    pub fn ping_snapshot_loading(&self) -> bool {
        self.ping_snapshot_loading
    }

    pub fn current_ping_map(&self) -> Option<&PlayerPingMaps> {
        self.current_ping_map.as_ref()
    }

    pub fn nodes(&self) -> &NodeCatalog {
        &self.nodes
    }

    /// The catalog entry for the selected node, if both exist.
    pub fn current_node(&self) -> Option<&NodeEntry> {
        self.nodes.get(self.current_node_id?)
    }

    /// Every player's ping to the selected node.
    ///
    /// Other players' numbers come from their ping reports. The local
    /// player's own number comes from our measurement of the node, which
    /// is fresher than anything we reported. Players whose report doesn't
    /// mention the node are left out.
    ///
    /// `None` until a node is selected and listed and a ping map exists.
    pub fn current_node_ping_map(
        &self,
        local_player: PlayerId,
    ) -> Option<BTreeMap<PlayerId, u32>> {
        let entry = self.current_node()?;
        let maps = self.current_ping_map.as_ref()?;
        let key = entry.node.node_id().ping_key();

        let mut pings: BTreeMap<PlayerId, u32> = maps
            .iter()
            .filter(|(player_id, _)| **player_id != local_player)
            .filter_map(|(player_id, map)| Some((*player_id, *map.get(&key)?)))
            .collect();

        if let Some(current) = entry.ping.and_then(|stats| stats.current) {
            pings.insert(local_player, current);
        }
        Some(pings)
    }

    /// Players sitting in the current game's slots, in slot order.
    pub fn players_in_slots(&self) -> Vec<&PlayerInfo> {
        self.current_game
            .iter()
            .flat_map(|game| game.slots.iter())
            .filter_map(|slot| slot.player.as_ref())
            .collect()
    }

    /// Index of the slot `player_id` occupies in the current game.
    pub fn local_slot(&self, player_id: PlayerId) -> Option<usize> {
        self.current_game
            .as_ref()?
            .slots
            .iter()
            .position(|slot| slot.player.as_ref().is_some_and(|p| p.id == player_id))
    }
}
