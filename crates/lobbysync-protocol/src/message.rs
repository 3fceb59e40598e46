//! Inbound and outbound lobby messages.
//!
//! Every frame the server pushes is one [`ServerMessage`]: a `"type"` tag
//! from a closed set plus a body whose shape is fixed by that tag.
//!
//! ```text
//! { "type": "GamePlayerLeave", "game_id": 1, "player_id": 7 }
//! ```
//!
//! Because this is a Rust enum, the router matches it exhaustively and
//! the compiler rejects a tag without a handler. A tag this client does
//! not know decodes to [`ServerMessage::Unknown`] instead of failing, so
//! a newer server can't break an older client.

use serde::{Deserialize, Serialize};

use crate::{
    ClientInfo, DisconnectReason, GameId, GameInfo, GameStatus, MapDetail,
    MapEntry, Node, NodeId, NodePingMap, PingSnapshot, PingStats, PlayerId,
    PlayerSession, PlayerStatus, Slot, SlotClientStatus, SlotSettings,
};

/// A server → client event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    // -- Connection / session lifecycle --
    /// Answer to `ReloadClientInfo`.
    ClientInfo(ClientInfo),
    ReloadClientInfoError { message: String },
    /// The authenticated session, sent after a successful `Connect`.
    PlayerSession(PlayerSession),
    /// Partial session update. Fields present here overwrite the session.
    PlayerSessionUpdate {
        status: PlayerStatus,
        game_id: Option<GameId>,
    },
    ConnectRejected { message: String },
    Disconnect {
        #[serde(default)]
        reason: DisconnectReason,
        #[serde(default)]
        message: String,
    },

    // -- Map catalog --
    ListMaps { maps: Vec<MapEntry> },
    ListMapsError { message: String },
    GetMapDetail(MapDetail),
    GetMapDetailError { path: String, message: String },

    // -- Game lifecycle --
    /// The game the player is in now, or `None` if they left it.
    CurrentGameInfo { game: Option<GameInfo> },
    GamePlayerEnter {
        game_id: GameId,
        slot_index: usize,
        slot: Slot,
    },
    GamePlayerLeave { game_id: GameId, player_id: PlayerId },
    GameSlotUpdate {
        game_id: GameId,
        slot_index: usize,
        settings: SlotSettings,
    },
    GameSelectNode {
        game_id: GameId,
        node_id: Option<NodeId>,
    },
    GameStarting { game_id: GameId },
    GameStarted { game_id: GameId },
    GameStartReject { game_id: GameId, message: String },
    GameStartError { game_id: GameId, message: String },
    GameSlotClientStatusUpdate {
        game_id: GameId,
        player_id: PlayerId,
        status: SlotClientStatus,
    },
    GameStatusUpdate { game_id: GameId, status: GameStatus },

    // -- Relay nodes and ping --
    ListNodes { nodes: Vec<Node> },
    PingUpdate {
        node_id: NodeId,
        ping: Option<PingStats>,
    },
    GamePlayerPingMapSnapshot(PingSnapshot),
    PlayerPingMapUpdate {
        player_id: PlayerId,
        ping_map: NodePingMap,
    },

    /// Any tag this client doesn't know. Ignored by the router.
    #[serde(other)]
    Unknown,
}

/// The bare discriminant of a [`ServerMessage`], for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTag {
    ClientInfo,
    ReloadClientInfoError,
    PlayerSession,
    PlayerSessionUpdate,
    ConnectRejected,
    Disconnect,
    ListMaps,
    ListMapsError,
    GetMapDetail,
    GetMapDetailError,
    CurrentGameInfo,
    GamePlayerEnter,
    GamePlayerLeave,
    GameSlotUpdate,
    GameSelectNode,
    GameStarting,
    GameStarted,
    GameStartReject,
    GameStartError,
    GameSlotClientStatusUpdate,
    GameStatusUpdate,
    ListNodes,
    PingUpdate,
    GamePlayerPingMapSnapshot,
    PlayerPingMapUpdate,
    Unknown,
}

impl ServerMessage {
    /// Returns this message's tag.
    pub fn tag(&self) -> MessageTag {
        match self {
            Self::ClientInfo(_) => MessageTag::ClientInfo,
            Self::ReloadClientInfoError { .. } => {
                MessageTag::ReloadClientInfoError
            }
            Self::PlayerSession(_) => MessageTag::PlayerSession,
            Self::PlayerSessionUpdate { .. } => MessageTag::PlayerSessionUpdate,
            Self::ConnectRejected { .. } => MessageTag::ConnectRejected,
            Self::Disconnect { .. } => MessageTag::Disconnect,
            Self::ListMaps { .. } => MessageTag::ListMaps,
            Self::ListMapsError { .. } => MessageTag::ListMapsError,
            Self::GetMapDetail(_) => MessageTag::GetMapDetail,
            Self::GetMapDetailError { .. } => MessageTag::GetMapDetailError,
            Self::CurrentGameInfo { .. } => MessageTag::CurrentGameInfo,
            Self::GamePlayerEnter { .. } => MessageTag::GamePlayerEnter,
            Self::GamePlayerLeave { .. } => MessageTag::GamePlayerLeave,
            Self::GameSlotUpdate { .. } => MessageTag::GameSlotUpdate,
            Self::GameSelectNode { .. } => MessageTag::GameSelectNode,
            Self::GameStarting { .. } => MessageTag::GameStarting,
            Self::GameStarted { .. } => MessageTag::GameStarted,
            Self::GameStartReject { .. } => MessageTag::GameStartReject,
            Self::GameStartError { .. } => MessageTag::GameStartError,
            Self::GameSlotClientStatusUpdate { .. } => {
                MessageTag::GameSlotClientStatusUpdate
            }
            Self::GameStatusUpdate { .. } => MessageTag::GameStatusUpdate,
            Self::ListNodes { .. } => MessageTag::ListNodes,
            Self::PingUpdate { .. } => MessageTag::PingUpdate,
            Self::GamePlayerPingMapSnapshot(_) => {
                MessageTag::GamePlayerPingMapSnapshot
            }
            Self::PlayerPingMapUpdate { .. } => MessageTag::PlayerPingMapUpdate,
            Self::Unknown => MessageTag::Unknown,
        }
    }
}

/// A client → server request. All of these are fire-and-forget: the
/// answer, if any, comes back later as a [`ServerMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Ask for a fresh [`ServerMessage::ClientInfo`].
    ReloadClientInfo,
    /// Authenticate; answered by `PlayerSession` or `ConnectRejected`.
    Connect { token: String },
    /// Ask for a [`ServerMessage::GamePlayerPingMapSnapshot`].
    GamePlayerPingMapSnapshotRequest { game_id: GameId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerInfo;

    fn decode(json: &str) -> ServerMessage {
        serde_json::from_str(json).expect("should decode")
    }

    #[test]
    fn test_server_message_is_internally_tagged() {
        let msg = ServerMessage::GamePlayerLeave {
            game_id: GameId(1),
            player_id: PlayerId(7),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "GamePlayerLeave");
        assert_eq!(json["game_id"], 1);
        assert_eq!(json["player_id"], 7);
    }

    #[test]
    fn test_unknown_tag_decodes_to_unknown() {
        let msg = decode(r#"{"type": "FlyToMoon", "speed": 9000}"#);
        assert_eq!(msg, ServerMessage::Unknown);
        assert_eq!(msg.tag(), MessageTag::Unknown);
    }

    #[test]
    fn test_newtype_body_fields_sit_beside_tag() {
        let msg = decode(
            r#"{"type": "PlayerSession",
                "player": {"id": 7, "name": "moon"},
                "status": "InGame", "game_id": 3}"#,
        );
        assert_eq!(
            msg,
            ServerMessage::PlayerSession(PlayerSession {
                player: PlayerInfo {
                    id: PlayerId(7),
                    name: "moon".into(),
                },
                status: PlayerStatus::InGame,
                game_id: Some(GameId(3)),
            })
        );
    }

    #[test]
    fn test_current_game_info_null_payload() {
        let msg = decode(r#"{"type": "CurrentGameInfo", "game": null}"#);
        assert_eq!(msg, ServerMessage::CurrentGameInfo { game: None });
    }

    #[test]
    fn test_disconnect_without_body_uses_defaults() {
        let msg = decode(r#"{"type": "Disconnect"}"#);
        assert_eq!(
            msg,
            ServerMessage::Disconnect {
                reason: DisconnectReason::Unknown,
                message: String::new(),
            }
        );
    }

    #[test]
    fn test_player_ping_map_update_keeps_string_keys() {
        let msg = decode(
            r#"{"type": "PlayerPingMapUpdate", "player_id": 7,
                "ping_map": {"9": 42, "10": 12}}"#,
        );
        let ServerMessage::PlayerPingMapUpdate { ping_map, .. } = msg else {
            panic!("wrong variant: {msg:?}");
        };
        assert_eq!(ping_map.get("9"), Some(&42));
        assert_eq!(ping_map.get("10"), Some(&12));
    }

    #[test]
    fn test_ping_snapshot_through_tagged_enum() {
        let msg = decode(
            r#"{"type": "GamePlayerPingMapSnapshot", "game_id": 1,
                "node_ping_map": {"9": {"7": 42}}}"#,
        );
        let ServerMessage::GamePlayerPingMapSnapshot(snapshot) = msg else {
            panic!("wrong variant: {msg:?}");
        };
        assert_eq!(snapshot.ping(NodeId(9), PlayerId(7)), Some(42));
    }

    #[test]
    fn test_tag_matches_variant() {
        assert_eq!(
            ServerMessage::ListNodes { nodes: vec![] }.tag(),
            MessageTag::ListNodes
        );
        assert_eq!(
            ServerMessage::GameStarted { game_id: GameId(1) }.tag(),
            MessageTag::GameStarted
        );
    }

    #[test]
    fn test_client_message_unit_variant_json() {
        let json = serde_json::to_value(&ClientMessage::ReloadClientInfo)
            .unwrap();
        assert_eq!(json, serde_json::json!({"type": "ReloadClientInfo"}));
    }

    #[test]
    fn test_client_message_connect_carries_token() {
        let json = serde_json::to_value(&ClientMessage::Connect {
            token: "secret".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "Connect");
        assert_eq!(json["token"], "secret");
    }
}
