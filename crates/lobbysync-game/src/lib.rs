//! Lobby and game state for Lobbysync.
//!
//! Holds the game the local player is in: its slot table, the relay node
//! it will be hosted on, the relay node catalog with our own measured
//! pings, and the other players' ping reports.
//!
//! # Key types
//!
//! - [`GameState`] — the slice itself, with its mutations and derived views
//! - [`GameAction`] — a mutation as a value, produced by the router
//! - [`NodeCatalog`] — relay nodes and locally measured ping stats
//! - [`GameError`] — desync conditions and stored request failures
//!
//! # The game id guard
//!
//! Every event about a game names that game. If it doesn't match the game
//! currently loaded, the event is for a game we already left: it is
//! dropped, not queued.

mod action;
mod error;
mod nodes;
mod state;
mod views;

pub use action::GameAction;
pub use error::GameError;
pub use nodes::{NodeCatalog, NodeEntry};
pub use state::{GameState, PlayerPingMaps};
