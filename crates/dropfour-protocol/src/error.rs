//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding wire frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serializing an outbound frame failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// A frame (or a nested payload inside it) could not be parsed.
    ///
    /// Common causes: non-JSON input, missing required fields, wrong field
    /// types, a board that is not a 6x7 grid, or cell values outside 0..=2.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame parsed as JSON but violates the protocol shape.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}
