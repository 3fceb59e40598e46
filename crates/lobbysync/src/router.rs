//! Message dispatch: server messages in, state actions out.
//!
//! [`dispatch`] is a pure function. It reads the message and the current
//! route and returns what should happen; the [`Store`](crate::Store)
//! applies it. Each message tag belongs to exactly one state slice, so a
//! dispatch never mixes slices except for the one cross-check noted on
//! `PlayerSessionUpdate`.

use lobbysync_game::{GameAction, GameError};
use lobbysync_protocol::ServerMessage;
use lobbysync_session::{ConnectionAction, ConnectionError, PlayerSessionPatch};

use crate::MapAction;

/// Where the UI currently is, as far as the router cares.
///
/// The router only *requests* navigation; it never performs it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    /// The game lobby screen for the current game.
    Lobby,
    /// Any other screen, by name.
    Other(String),
}

/// An action for one state slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Connection(ConnectionAction),
    Game(GameAction),
    Maps(MapAction),
}

/// The result of dispatching one message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Actions to apply, in order.
    pub actions: Vec<Action>,
    /// A navigation request, if the message calls for one.
    pub navigate: Option<Route>,
}

impl Dispatch {
    fn one(action: Action) -> Self {
        Self {
            actions: vec![action],
            navigate: None,
        }
    }

    fn connection(action: ConnectionAction) -> Self {
        Self::one(Action::Connection(action))
    }

    fn game(action: GameAction) -> Self {
        Self::one(Action::Game(action))
    }

    fn maps(action: MapAction) -> Self {
        Self::one(Action::Maps(action))
    }

    /// `true` if there is nothing to do.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.navigate.is_none()
    }
}

/// Maps one server message to the actions it implies.
///
/// Messages must be dispatched (and applied) in arrival order; the state
/// slices rely on it.
pub fn dispatch(message: &ServerMessage, route: &Route) -> Dispatch {
    match message {
        // -- Connection / session --
        ServerMessage::ClientInfo(info) => Dispatch::connection(
            ConnectionAction::CompleteClientInfoReload(info.clone()),
        ),
        ServerMessage::ReloadClientInfoError { message } => {
            Dispatch::connection(ConnectionAction::FailClientInfoReload(
                ConnectionError::Request(message.clone()),
            ))
        }
        ServerMessage::PlayerSession(session) => Dispatch::connection(
            ConnectionAction::CompletePlayerSessionLoad(session.clone()),
        ),
        ServerMessage::PlayerSessionUpdate { status, game_id } => {
            let patch = PlayerSessionPatch {
                player: None,
                status: Some(*status),
                game_id: Some(*game_id),
            };
            // The session now says which game we're in; make sure the
            // loaded game agrees.
            Dispatch {
                actions: vec![
                    Action::Connection(ConnectionAction::PatchPlayerSession(
                        patch,
                    )),
                    Action::Game(GameAction::ReconcileMembership {
                        claimed: *game_id,
                    }),
                ],
                navigate: None,
            }
        }
        ServerMessage::ConnectRejected { message } => {
            Dispatch::connection(ConnectionAction::FailPlayerSessionLoad(
                ConnectionError::Rejected(message.clone()),
            ))
        }
        ServerMessage::Disconnect { reason, message } => {
            Dispatch::connection(ConnectionAction::RecordDisconnect(
                ConnectionError::Disconnected {
                    reason: *reason,
                    message: message.clone(),
                },
            ))
        }

        // -- Map catalog --
        ServerMessage::ListMaps { maps } => {
            Dispatch::maps(MapAction::SetList(maps.clone()))
        }
        ServerMessage::ListMapsError { message } => {
            Dispatch::maps(MapAction::FailList(message.clone()))
        }
        ServerMessage::GetMapDetail(detail) => {
            Dispatch::maps(MapAction::SetDetail(detail.clone()))
        }
        ServerMessage::GetMapDetailError { path, message } => {
            Dispatch::maps(MapAction::FailDetail {
                path: path.clone(),
                message: message.clone(),
            })
        }

        // -- Game lifecycle --
        ServerMessage::CurrentGameInfo { game } => {
            let navigate = (game.is_some() && *route != Route::Lobby)
                .then_some(Route::Lobby);
            Dispatch {
                actions: vec![Action::Game(GameAction::ReplaceGame(
                    game.clone(),
                ))],
                navigate,
            }
        }
        ServerMessage::GamePlayerEnter {
            game_id,
            slot_index,
            slot,
        } => Dispatch::game(GameAction::PlayerEnter {
            game_id: *game_id,
            slot_index: *slot_index,
            slot: slot.clone(),
        }),
        ServerMessage::GamePlayerLeave { game_id, player_id } => {
            Dispatch::game(GameAction::PlayerLeave {
                game_id: *game_id,
                player_id: *player_id,
            })
        }
        ServerMessage::GameSlotUpdate {
            game_id,
            slot_index,
            settings,
        } => Dispatch::game(GameAction::UpdateSlotSettings {
            game_id: *game_id,
            slot_index: *slot_index,
            settings: *settings,
        }),
        ServerMessage::GameSelectNode { game_id, node_id } => {
            Dispatch::game(GameAction::SelectNode {
                game_id: *game_id,
                node_id: *node_id,
            })
        }
        ServerMessage::GameStarting { game_id } => {
            Dispatch::game(GameAction::Starting { game_id: *game_id })
        }
        ServerMessage::GameStarted { game_id } => {
            Dispatch::game(GameAction::Started { game_id: *game_id })
        }
        ServerMessage::GameStartReject { game_id, message } => {
            Dispatch::game(GameAction::RejectStart {
                game_id: *game_id,
                error: GameError::StartRejected(message.clone()),
            })
        }
        ServerMessage::GameStartError { game_id, message } => {
            Dispatch::game(GameAction::RejectStart {
                game_id: *game_id,
                error: GameError::StartFailed(message.clone()),
            })
        }
        ServerMessage::GameSlotClientStatusUpdate {
            game_id,
            player_id,
            status,
        } => Dispatch::game(GameAction::UpdateSlotClientStatus {
            game_id: *game_id,
            player_id: *player_id,
            status: *status,
        }),
        ServerMessage::GameStatusUpdate { game_id, status } => {
            Dispatch::game(GameAction::UpdateGameStatus {
                game_id: *game_id,
                status: *status,
            })
        }

        // -- Relay nodes and ping --
        ServerMessage::ListNodes { nodes } => {
            Dispatch::game(GameAction::SetNodes(nodes.clone()))
        }
        ServerMessage::PingUpdate { node_id, ping } => {
            Dispatch::game(GameAction::UpdateNodePing {
                node_id: *node_id,
                ping: *ping,
            })
        }
        ServerMessage::GamePlayerPingMapSnapshot(snapshot) => {
            Dispatch::game(GameAction::SetPingSnapshot(snapshot.clone()))
        }
        ServerMessage::PlayerPingMapUpdate {
            player_id,
            ping_map,
        } => Dispatch::game(GameAction::MergePing {
            player_id: *player_id,
            delta: ping_map.clone(),
        }),

        ServerMessage::Unknown => {
            tracing::debug!("ignoring message with unknown tag");
            Dispatch::default()
        }
    }
}
