//! Transport layer for the Dropfour client.
//!
//! Provides the [`Transport`] trait that abstracts over the persistent
//! text-message connection to the game server, plus the default
//! WebSocket implementation.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — [`WebSocketLink`] via `tokio-tungstenite`

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::WebSocketLink;

use std::future::Future;

/// Something that happened on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// An inbound text frame.
    Frame(String),

    /// A socket-level error. The connection is left as it is: not retried,
    /// not reopened. An unclean [`TransportEvent::Closed`] follows.
    Failed(String),

    /// The connection is gone. `clean` is true when the peer completed the
    /// close handshake; an error or an abrupt end of stream is unclean.
    Closed { clean: bool, reason: String },
}

/// A persistent bidirectional text-message connection to the server.
///
/// The trait is the seam between the connection manager and the network:
/// tests substitute a scripted double that records outbound frames. Methods
/// return `impl Future + Send` so a caller generic over the transport can
/// still spawn its read loop onto the runtime.
pub trait Transport: Send + Sync + 'static {
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the connection is currently able to send.
    fn is_open(&self) -> bool;

    /// Sends one text frame to the server.
    fn send(&self, text: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Waits for the next connection event.
    ///
    /// Yields `None` once the connection has fully wound down; after a
    /// [`TransportEvent::Closed`] every subsequent call returns `None`.
    fn next_event(&self) -> impl Future<Output = Option<TransportEvent>> + Send;

    /// Closes the connection.
    fn close(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
