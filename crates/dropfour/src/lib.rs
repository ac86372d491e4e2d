//! # Dropfour
//!
//! Client-side connection manager for a Connect-Four game server.
//!
//! The client owns one persistent WebSocket for its whole life, folds
//! inbound frames into reactive session state, and exposes the handshake
//! result — the catalog of opponent algorithms — as an awaitable value.
//!
//! ```text
//! server ──frames──→ transport ──→ dispatch ──→ state store ──→ UI
//!                        ↑                          ↑
//!                   GameClient::start_game    SessionStore reads
//! ```
//!
//! There is no reconnection and no second session: the application's
//! composition root constructs exactly one [`GameClient`] and hands out
//! references.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dropfour::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env();
//! let client = GameClient::connect(&config, Arc::new(LogNotifier)).await?;
//!
//! let algorithms = client.algorithms().await;
//! client.store().begin_game();
//! client.start_game(&algorithms[0], 2).await;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod dispatch;
mod notify;

pub use client::GameClient;
pub use config::ClientConfig;
pub use notify::{LogNotifier, Notifier};

pub mod prelude {
    pub use crate::{ClientConfig, GameClient, LogNotifier, Notifier};
    pub use dropfour_protocol::{Board, Cell, Move, Player, ServerFrame, StartRequest, COLUMNS, ROWS};
    pub use dropfour_state::{AlgorithmCatalog, Screen, SessionStore};
    pub use dropfour_transport::{Transport, TransportError, TransportEvent, WebSocketLink};
}
