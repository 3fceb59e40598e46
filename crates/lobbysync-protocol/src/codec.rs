//! Codec trait and implementations for message framing.
//!
//! A codec turns messages into frame payloads and back. The client
//! runtime is generic over [`Codec`], so switching the wire format does
//! not touch the router or the state slices.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust values to bytes and decode bytes back.
///
/// `decode` is generic over `DeserializeOwned` so the decoded message
/// owns its data and the receive buffer can be dropped right away.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value can't be represented
    /// in this format.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is what the lobby server speaks on its WebSocket. Behind the
/// `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use lobbysync_protocol::{Codec, JsonCodec, ServerMessage, GameId};
///
/// let codec = JsonCodec;
/// let msg = ServerMessage::GameStarting { game_id: GameId(3) };
///
/// let bytes = codec.encode(&msg).unwrap();
/// let decoded: ServerMessage = codec.decode(&bytes).unwrap();
/// assert_eq!(msg, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{ClientMessage, GameId, ServerMessage};

    #[test]
    fn test_json_codec_encodes_outbound_request() {
        let bytes = JsonCodec
            .encode(&ClientMessage::GamePlayerPingMapSnapshotRequest {
                game_id: GameId(12),
            })
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["type"], "GamePlayerPingMapSnapshotRequest");
        assert_eq!(json["game_id"], 12);
    }

    #[test]
    fn test_json_codec_decode_garbage_returns_decode_error() {
        let result: Result<ServerMessage, _> =
            JsonCodec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_decode_known_tag_with_bad_body_returns_error() {
        // A known tag promises a body shape; breaking it is a decode error,
        // not a silent default.
        let result: Result<ServerMessage, _> = JsonCodec
            .decode(br#"{"type": "GameStarting", "game_id": "three"}"#);
        assert!(result.is_err());
    }
}
