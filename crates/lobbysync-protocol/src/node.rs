//! Relay node descriptor and its protobuf codec.
//!
//! Nodes are the relay servers a game can be hosted on. The record is
//! protobuf on the wire, with proto3 implicit presence: a zero `id` or an
//! empty string is left off the wire entirely, and a missing field
//! decodes to its default. Peers that speak the same `.proto` rely on
//! that, so the encoding must not change.
//!
//! ```text
//! message Node {
//!   int32  id         = 1;
//!   string name       = 2;
//!   string location   = 3;
//!   string ip_addr    = 4;
//!   string country_id = 5;
//! }
//! ```

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::{NodeId, ProtocolError};

/// A relay node descriptor.
///
/// `prost::Message` also derives `Debug` and `Default` for us. The serde
/// derives let the same record ride inside JSON lobby messages.
#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub location: String,
    #[prost(string, tag = "4")]
    pub ip_addr: String,
    #[prost(string, tag = "5")]
    pub country_id: String,
}

impl Node {
    /// This node's id as a [`NodeId`].
    pub fn node_id(&self) -> NodeId {
        NodeId(self.id)
    }
}

/// Encode a node into protobuf bytes.
#[must_use]
pub fn encode_node(node: &Node) -> Vec<u8> {
    // Encoding into a growable Vec can't run out of room, which is the
    // only error prost reports.
    node.encode_to_vec()
}

/// Decode protobuf bytes into a node.
///
/// # Errors
///
/// Returns [`ProtocolError::NodeDecode`] for malformed bytes.
pub fn decode_node(bytes: &[u8]) -> Result<Node, ProtocolError> {
    Ok(Node::decode(bytes)?)
}
