//! Bodies carried by lobby messages.
//!
//! These mirror what the lobby server pushes: players, games, slots,
//! ping statistics and map catalog entries. The state slices store them
//! as-is, so every type here is `Clone` and comparable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Node;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A player's id as assigned by the lobby server.
///
/// Newtype over the server's `i32` so a `GameId` can't be passed where a
/// player is expected. `#[serde(transparent)]` keeps it a plain number on
/// the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub i32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A game (lobby) id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub i32);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// A relay node id. Matches [`Node::id`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub i32);

impl NodeId {
    /// The key this node is filed under in a [`NodePingMap`].
    ///
    /// Player ping maps arrive keyed by the node id's decimal string, so
    /// lookups must go through this instead of comparing integers.
    pub fn ping_key(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N-{}", self.0)
    }
}

/// One player's measured pings, keyed by node id string.
pub type NodePingMap = BTreeMap<String, u32>;

// ---------------------------------------------------------------------------
// Client / session
// ---------------------------------------------------------------------------

/// Information about the local client process reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client version string.
    pub version: String,
}

/// A player as shown in lobbies and slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
}

/// What the player is doing right now, as far as the server knows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum PlayerStatus {
    #[default]
    Idle,
    InGame,
}

/// The authenticated player's session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerSession {
    pub player: PlayerInfo,
    #[serde(default)]
    pub status: PlayerStatus,
    /// The game the server believes this player is in.
    #[serde(default)]
    pub game_id: Option<GameId>,
}

/// Why the server dropped the connection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum DisconnectReason {
    /// The same account connected from somewhere else.
    Multi,
    /// The server is going down for maintenance.
    Maintenance,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multi => write!(f, "connected elsewhere"),
            Self::Maintenance => write!(f, "server maintenance"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Games and slots
// ---------------------------------------------------------------------------

/// Whether a slot can take a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum SlotStatus {
    #[default]
    Open,
    Closed,
    Occupied,
}

/// Per-slot configuration chosen in the lobby.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(default)]
pub struct SlotSettings {
    pub team: i32,
    pub color: i32,
    pub computer: i32,
    pub handicap: i32,
    pub race: i32,
    pub status: SlotStatus,
}

/// How far a slot's game client has progressed toward joining the match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum SlotClientStatus {
    #[default]
    Pending,
    Connected,
    Joined,
    Loading,
    Loaded,
    Disconnected,
    Left,
}

/// One position in a game's slot table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub settings: SlotSettings,
    #[serde(default)]
    pub player: Option<PlayerInfo>,
    #[serde(default)]
    pub client_status: SlotClientStatus,
}

/// Lifecycle of a game as reported by the server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum GameStatus {
    #[default]
    Preparing,
    Created,
    Running,
    Ended,
    Paused,
    Terminated,
}

/// The game the local player is currently in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: GameId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: GameStatus,
    /// Fixed-length slot table; indices are stable positions.
    pub slots: Vec<Slot>,
    /// The relay node the game will be hosted on.
    #[serde(default)]
    pub node: Option<Node>,
    #[serde(default)]
    pub created_by: Option<PlayerInfo>,
}

// ---------------------------------------------------------------------------
// Ping
// ---------------------------------------------------------------------------

/// Locally measured ping statistics to one relay node, in milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(default)]
pub struct PingStats {
    pub min: u32,
    pub max: u32,
    pub avg: u32,
    /// Most recent sample, if the node answered at all.
    pub current: Option<u32>,
}

/// A one-shot snapshot of every player's ping to every node, for one game.
///
/// Keys are decimal id strings, as in [`NodePingMap`]. Integer map keys
/// don't survive the buffering serde does for internally tagged enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingSnapshot {
    pub game_id: GameId,
    /// node id → (player id → ping ms)
    #[serde(default)]
    pub node_ping_map: BTreeMap<String, BTreeMap<String, u32>>,
}

impl PingSnapshot {
    /// Looks up one player's ping to one node.
    pub fn ping(&self, node_id: NodeId, player_id: PlayerId) -> Option<u32> {
        self.node_ping_map
            .get(&node_id.ping_key())?
            .get(&player_id.0.to_string())
            .copied()
    }
}

// ---------------------------------------------------------------------------
// Map catalog
// ---------------------------------------------------------------------------

/// A map in the server's catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub path: String,
    #[serde(default)]
    pub name: String,
}

/// Detail for a single map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDetail {
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub num_players: u32,
    #[serde(default)]
    pub sha1: Option<String>,
}
