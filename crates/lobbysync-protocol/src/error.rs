//! Error types for the protocol layer.
//!
//! A `ProtocolError` always means "these bytes are not a message we can
//! read" (or the reverse). It never means the message made no sense for
//! the current state; that is the state slices' business.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, a known `type` tag with a body of
    /// the wrong shape, or a truncated frame.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A relay node record could not be decoded from protobuf bytes.
    #[error("node decode failed: {0}")]
    NodeDecode(#[from] prost::DecodeError),
}
