//! Wire protocol for Lobbysync.
//!
//! This crate defines what the lobby server and the client say to each
//! other:
//!
//! - **Messages** ([`ServerMessage`], [`ClientMessage`]) — the inbound
//!   event envelope and the outbound requests.
//! - **Types** ([`GameInfo`], [`Slot`], [`PlayerSession`], ids, etc.) —
//!   the bodies those messages carry.
//! - **Node** ([`Node`]) — the relay node descriptor, a protobuf record.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages become
//!   bytes and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! The protocol layer sits between the connection (raw frames) and the
//! state slices. It knows nothing about what the client does with a
//! message; it only knows its shape.
//!
//! ```text
//! Connection (bytes) → Protocol (ServerMessage) → Router → State slices
//! ```

mod codec;
mod error;
mod message;
mod node;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use message::{ClientMessage, MessageTag, ServerMessage};
pub use node::{decode_node, encode_node, Node};
pub use types::{
    ClientInfo, DisconnectReason, GameId, GameInfo, GameStatus, MapDetail,
    MapEntry, NodeId, NodePingMap, PingSnapshot, PingStats, PlayerId,
    PlayerInfo, PlayerSession, PlayerStatus, Slot, SlotClientStatus,
    SlotSettings, SlotStatus,
};
