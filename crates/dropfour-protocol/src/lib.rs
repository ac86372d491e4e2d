//! Wire protocol for the Dropfour client.
//!
//! This crate defines the language the game server speaks:
//!
//! - **Types** ([`ServerFrame`], [`Board`], [`Move`], [`StartRequest`]) —
//!   the shapes that travel on the wire.
//! - **Codec** ([`decode_frame`], [`encode_start_request`]) — JSON
//!   conversion, including the protocol's two quirks: the board nested as
//!   a JSON-encoded string, and winners that may arrive stringified.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while converting.
//!
//! The protocol layer sits between the transport (raw text frames) and the
//! session state; it knows nothing about connections or screens.

mod error;
mod types;

#[cfg(feature = "json")]
mod codec;

#[cfg(feature = "json")]
pub use codec::{decode_frame, encode_start_request};
pub use error::ProtocolError;
pub use types::{Board, Cell, Move, Player, ServerFrame, StartRequest, COLUMNS, ROWS};
