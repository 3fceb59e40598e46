//! The store: owner of every state slice.

use lobbysync_game::GameState;
use lobbysync_protocol::ServerMessage;
use lobbysync_session::ConnectionState;

use crate::router::{self, Action, Dispatch, Route};
use crate::{LobbysyncError, MapCatalog};

/// Owns the connection slice, the game slice and the map catalog.
///
/// One store per client, owned by whoever drives it; there is no global
/// instance. All mutation goes through [`apply`](Self::apply), which is
/// where rules spanning more than one slice live:
///
/// - any connection action that leaves the link `Disconnected` also
///   clears the current game;
/// - a game action that finds local state out of sync with the server is
///   logged and dropped, not returned.
#[derive(Debug, Clone, Default)]
pub struct Store {
    connection: ConnectionState,
    game: GameState,
    maps: MapCatalog,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action to the slice it targets.
    ///
    /// A rejected game action is logged and dropped. Use
    /// [`try_apply`](Self::try_apply) to see the rejection instead.
    pub fn apply(&mut self, action: Action) {
        if let Err(e) = self.try_apply(action) {
            tracing::warn!(error = %e, "game event rejected");
        }
    }

    /// Applies one action, returning the error if the game slice rejected
    /// it. State is unchanged when it does.
    ///
    /// # Errors
    /// [`LobbysyncError::Game`] when a game action names a slot the
    /// current game doesn't have.
    pub fn try_apply(&mut self, action: Action) -> Result<(), LobbysyncError> {
        match action {
            Action::Connection(action) => {
                let disconnects = action.disconnects();
                self.connection.apply(action);
                if disconnects {
                    self.game.replace_game(None);
                }
            }
            Action::Game(action) => self.game.apply(action)?,
            Action::Maps(action) => self.maps.apply(action),
        }
        Ok(())
    }

    /// Dispatches `message` and applies the resulting actions in order.
    ///
    /// Returns the navigation the message requested, if any.
    pub fn handle(
        &mut self,
        message: &ServerMessage,
        route: &Route,
    ) -> Option<Route> {
        let tag = message.tag();
        let Dispatch { actions, navigate } = router::dispatch(message, route);
        tracing::trace!(tag = ?tag, actions = actions.len(), "handling server message");
        for action in actions {
            self.apply(action);
        }
        navigate
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    /// Mutable access for begin-mutations issued alongside a request.
    pub fn connection_mut(&mut self) -> &mut ConnectionState {
        &mut self.connection
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Mutable access for begin-mutations issued alongside a request.
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn maps(&self) -> &MapCatalog {
        &self.maps
    }
}
