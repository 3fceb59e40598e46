//! # Lobbysync
//!
//! Client-side state synchronization for a multiplayer lobby.
//!
//! The lobby server pushes a stream of typed delta events over one
//! long-lived connection. Lobbysync turns each event into mutations of two
//! state slices, connection state and game state, and keeps their
//! invariants while doing it.
//!
//! ```text
//! frame ──decode──▶ ServerMessage ──router::dispatch──▶ [Action] ──Store::apply──▶ state
//!                                            └──▶ navigation request
//! ```
//!
//! The router is a pure function: given a message and the current route
//! it returns the actions to apply, and never touches state itself.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lobbysync::prelude::*;
//!
//! # async fn demo() -> Result<(), LobbysyncError> {
//! let config = ClientConfig::default();
//! let conn = WebSocketConnection::connect(&config.url).await?;
//! let (mut client, mut navigation) = LobbyClientBuilder::new()
//!     .config(config)
//!     .build(conn, JsonCodec);
//!
//! client.connect("session-token").await?;
//! client.run().await?;
//! while let Ok(route) = navigation.try_recv() {
//!     println!("navigate to {route:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod maps;
pub mod router;
mod store;

pub use client::{LobbyClient, LobbyClientBuilder};
pub use config::ClientConfig;
pub use error::LobbysyncError;
pub use maps::{MapAction, MapCatalog};
pub use router::{Action, Dispatch, Route};
pub use store::Store;

/// Everything needed to drive a client, in one import.
pub mod prelude {
    pub use crate::{
        Action, ClientConfig, Dispatch, LobbyClient, LobbyClientBuilder,
        LobbysyncError, MapCatalog, Route, Store,
    };
    pub use lobbysync_game::{GameAction, GameError, GameState};
    pub use lobbysync_protocol::{
        ClientMessage, Codec, GameId, JsonCodec, NodeId, PlayerId,
        ServerMessage,
    };
    pub use lobbysync_session::{
        ConnectionAction, ConnectionError, ConnectionState, LinkStatus,
    };
    pub use lobbysync_transport::{Connection, WebSocketConnection};
}
