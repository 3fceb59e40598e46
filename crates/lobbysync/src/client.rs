//! `LobbyClient` builder and receive loop.
//!
//! This is the entry point for running a Lobbysync client. It ties the
//! layers together: connection → codec → router → store.

use lobbysync_protocol::{ClientMessage, Codec, GameId, ServerMessage};
use lobbysync_session::{ConnectionAction, ConnectionError, LinkStatus};
use lobbysync_transport::Connection;
use tokio::sync::mpsc;

use crate::router::{Action, Route};
use crate::{ClientConfig, LobbysyncError, Store};

/// Builder for a [`LobbyClient`].
///
/// # Example
///
/// ```rust,ignore
/// let (client, navigation) = LobbyClientBuilder::new()
///     .config(ClientConfig::default())
///     .route(Route::Home)
///     .build(connection, JsonCodec);
/// ```
#[derive(Debug, Default)]
pub struct LobbyClientBuilder {
    config: ClientConfig,
    route: Route,
}

impl LobbyClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the receive timeout. `None` waits forever.
    pub fn recv_timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.config.recv_timeout = timeout;
        self
    }

    /// Sets whether joining a game requests navigation to the lobby.
    pub fn lobby_route_on_game(mut self, enabled: bool) -> Self {
        self.config.lobby_route_on_game = enabled;
        self
    }

    /// Sets the route the UI starts on.
    pub fn route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    /// Builds a client around an already open connection.
    ///
    /// Returns the client and the receiving end of its navigation
    /// channel. The link starts out `Connected`.
    pub fn build<C: Connection, K: Codec>(
        self,
        conn: C,
        codec: K,
    ) -> (LobbyClient<C, K>, mpsc::UnboundedReceiver<Route>) {
        let (navigation, navigation_rx) = mpsc::unbounded_channel();
        let mut store = Store::new();
        store.apply(Action::Connection(ConnectionAction::SetStatus(
            LinkStatus::Connected,
        )));
        tracing::debug!(conn_id = %conn.id(), url = %self.config.url, "lobby client built");

        let client = LobbyClient {
            conn,
            codec,
            config: self.config,
            store,
            route: self.route,
            navigation,
        };
        (client, navigation_rx)
    }
}

/// A client for one lobby server connection.
///
/// Owns the connection and the [`Store`]. Requests go out through the
/// `reload_client_info` / `connect` / `request_ping_snapshot` methods,
/// each of which marks its resource as loading before sending. Answers
/// come back through [`run`](Self::run).
///
/// Navigation the router asks for is sent on the channel returned by
/// [`LobbyClientBuilder::build`]; the UI decides what to do with it.
pub struct LobbyClient<C: Connection, K: Codec> {
    conn: C,
    codec: K,
    config: ClientConfig,
    store: Store,
    route: Route,
    navigation: mpsc::UnboundedSender<Route>,
}

impl<C: Connection, K: Codec> LobbyClient<C, K> {
    /// Creates a new builder.
    pub fn builder() -> LobbyClientBuilder {
        LobbyClientBuilder::new()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The route the client believes the UI is on.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Tells the client the UI moved to `route`.
    pub fn set_route(&mut self, route: Route) {
        self.route = route;
    }

    // -- Requests -----------------------------------------------------------

    /// Asks the server for fresh client info.
    pub async fn reload_client_info(&mut self) -> Result<(), LobbysyncError> {
        self.store.connection_mut().begin_client_info_reload();
        self.send(&ClientMessage::ReloadClientInfo).await
    }

    /// Authenticates with `token`. The answer is a `PlayerSession` or a
    /// `ConnectRejected`.
    pub async fn connect(&mut self, token: &str) -> Result<(), LobbysyncError> {
        self.store.connection_mut().begin_player_session_load();
        self.send(&ClientMessage::Connect {
            token: token.to_string(),
        })
        .await
    }

    /// Asks for every player's ping to every node in `game_id`.
    pub async fn request_ping_snapshot(
        &mut self,
        game_id: GameId,
    ) -> Result<(), LobbysyncError> {
        self.store.game_mut().begin_ping_snapshot();
        self.send(&ClientMessage::GamePlayerPingMapSnapshotRequest { game_id })
            .await
    }

    /// Encodes and sends one request. A failed send takes the link down.
    async fn send(&mut self, message: &ClientMessage) -> Result<(), LobbysyncError> {
        let data = self.codec.encode(message)?;
        if let Err(e) = self.conn.send(&data).await {
            self.link_lost(Some(&e));
            return Err(LobbysyncError::Connection(Box::new(e)));
        }
        Ok(())
    }

    // -- Receive loop -------------------------------------------------------

    /// Receives and handles frames until the connection closes.
    ///
    /// Frames that don't decode are logged and skipped. A clean close
    /// returns `Ok`; a failed or timed-out receive returns the error. In
    /// both cases the link is `Disconnected` afterwards.
    pub async fn run(&mut self) -> Result<(), LobbysyncError> {
        let conn_id = self.conn.id();
        tracing::info!(%conn_id, "lobby client running");

        loop {
            let recv = self.conn.recv();
            let received = match self.config.recv_timeout {
                Some(limit) => match tokio::time::timeout(limit, recv).await {
                    Ok(received) => received,
                    Err(_) => {
                        tracing::info!(%conn_id, "no message from server, giving up");
                        self.link_lost(Some(&LobbysyncError::Timeout(limit)));
                        return Err(LobbysyncError::Timeout(limit));
                    }
                },
                None => recv.await,
            };

            let data = match received {
                Ok(Some(data)) => data,
                Ok(None) => {
                    tracing::info!(%conn_id, "connection closed cleanly");
                    self.link_lost(None::<&LobbysyncError>);
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(%conn_id, error = %e, "recv error");
                    self.link_lost(Some(&e));
                    return Err(LobbysyncError::Connection(Box::new(e)));
                }
            };

            let message: ServerMessage = match self.codec.decode(&data) {
                Ok(message) => message,
                Err(e) => {
                    tracing::debug!(%conn_id, error = %e, "failed to decode server message");
                    continue;
                }
            };

            self.handle(&message);
        }
    }

    /// Handles one decoded message: applies it and forwards navigation.
    pub fn handle(&mut self, message: &ServerMessage) {
        let Some(route) = self.store.handle(message, &self.route) else {
            return;
        };
        if !self.config.lobby_route_on_game {
            tracing::debug!(?route, "navigation disabled, ignoring request");
            return;
        }
        tracing::debug!(?route, "requesting navigation");
        self.route = route.clone();
        if self.navigation.send(route).is_err() {
            tracing::debug!("navigation receiver dropped");
        }
    }

    /// Closes the connection and marks the link `Disconnected`.
    pub async fn close(&mut self) -> Result<(), LobbysyncError> {
        let result = self.conn.close().await;
        self.link_lost(None::<&LobbysyncError>);
        result.map_err(|e| LobbysyncError::Connection(Box::new(e)))
    }

    /// Records a lost link: the error if there was one, then `Disconnected`
    /// (which also clears the game).
    fn link_lost<E: std::fmt::Display + ?Sized>(&mut self, error: Option<&E>) {
        if let Some(e) = error {
            self.store.apply(Action::Connection(ConnectionAction::SetError(Some(
                ConnectionError::Transport(e.to_string()),
            ))));
        }
        self.store
            .apply(Action::Connection(ConnectionAction::SetDisconnected));
    }
}
