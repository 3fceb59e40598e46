//! Connection state for Lobbysync.
//!
//! This crate owns the client's view of its link to the lobby server:
//!
//! 1. **Link status** — idle, connecting, connected, disconnected
//! 2. **Client info** — what the server reports about this client
//! 3. **Player session** — who we are logged in as, and which game the
//!    server thinks we're in
//!
//! Each sub-resource has its own loading and error fields, driven by a
//! begin-mutation when a request goes out and a completion when the
//! answer comes back.
//!
//! # How it fits in the stack
//!
//! ```text
//! Router (above)  ← turns server messages into ConnectionAction values
//!     ↕
//! Connection state (this crate)  ← applies them, keeps the invariants
//!     ↕
//! Protocol (below)  ← provides ClientInfo, PlayerSession, ids
//! ```

mod action;
mod error;
mod inflight;
mod state;

pub use action::ConnectionAction;
pub use error::ConnectionError;
pub use inflight::{BeginOutcome, InFlight};
pub use state::{ConnectionState, LinkStatus, PlayerSessionPatch};
