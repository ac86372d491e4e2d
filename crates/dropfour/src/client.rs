//! The connection manager: owns the transport and the session state.

use std::sync::Arc;

use dropfour_protocol::{encode_start_request, StartRequest};
use dropfour_state::{AlgorithmCatalog, SessionStore};
use dropfour_transport::{Transport, TransportError, TransportEvent, WebSocketLink};
use tokio::task::JoinHandle;

use crate::dispatch::Dispatcher;
use crate::{ClientConfig, Notifier};

/// The client-side connection manager.
///
/// Holds the one persistent connection for the life of the process; the
/// application's composition root constructs a single instance and hands
/// out references. There is no reconnection — when the connection ends, so
/// does the client's useful life.
///
/// Inbound handling runs on one spawned task; the four connection concerns
/// — opened, message, error, closed — are arms of that single loop, so no
/// two of them ever run concurrently and the store needs no locking beyond
/// its watch channels.
pub struct GameClient<T: Transport> {
    transport: Arc<T>,
    store: SessionStore,
    catalog: AlgorithmCatalog,
    notifier: Arc<dyn Notifier>,
    reader: Option<JoinHandle<()>>,
}

impl GameClient<WebSocketLink> {
    /// Connects to the configured endpoint and starts the inbound loop.
    ///
    /// # Errors
    /// Returns [`TransportError::ConnectFailed`] when the endpoint cannot
    /// be reached. This is the only public entry point that fails with an
    /// error; after construction, all failure turns into notifications.
    pub async fn connect(
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, TransportError> {
        let link = WebSocketLink::connect(&config.endpoint).await?;
        Ok(Self::attach(link, notifier))
    }
}

impl<T: Transport> GameClient<T> {
    /// Wraps an already-connected transport and spawns the inbound loop.
    pub fn attach(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        let transport = Arc::new(transport);
        let store = SessionStore::new();
        let catalog = AlgorithmCatalog::new();

        let dispatcher = Dispatcher::new(store.clone(), catalog.clone(), Arc::clone(&notifier));
        let reader = tokio::spawn(run_inbound_loop(
            Arc::clone(&transport),
            dispatcher,
            Arc::clone(&notifier),
        ));

        Self {
            transport,
            store,
            catalog,
            notifier,
            reader: Some(reader),
        }
    }

    /// Read/subscribe access to the session state containers.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The handshake readiness cell, for callers that want `is_resolved`
    /// or `peek` rather than a wait.
    pub fn catalog(&self) -> &AlgorithmCatalog {
        &self.catalog
    }

    /// Waits for the server's algorithm catalog.
    ///
    /// Resolves when the handshake frame arrives; after that it returns
    /// the cached catalog immediately, however many times it is called.
    pub async fn algorithms(&self) -> Vec<String> {
        self.catalog.wait().await
    }

    /// Asks the server to start a game against `algorithm` at `difficulty`.
    ///
    /// Catalog membership is not validated here — the server rejects
    /// unknown names. When the transport is not open the request is
    /// dropped: the user is notified and a diagnostic is logged, but no
    /// error is returned and no state changes.
    pub async fn start_game(&self, algorithm: &str, difficulty: u32) {
        if !self.transport.is_open() {
            self.notifier
                .alert("Cannot start game: connection is not open.");
            tracing::error!(
                open = false,
                algorithm,
                "start request dropped; transport is not open"
            );
            return;
        }

        let request = StartRequest {
            algorithm: algorithm.to_owned(),
            difficulty,
        };
        let text = match encode_start_request(&request) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode start request");
                return;
            }
        };

        if let Err(e) = self.transport.send(&text).await {
            self.notifier.alert("Failed to send game start request.");
            tracing::error!(error = %e, "send failed");
        }
    }

    /// Closes the connection if it is still open and stops the inbound
    /// loop. The composition root calls this at process teardown.
    pub async fn shutdown(&mut self) {
        if self.transport.is_open() {
            tracing::info!("closing connection");
            if let Err(e) = self.transport.close().await {
                tracing::warn!(error = %e, "close failed");
            }
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
            let _ = reader.await;
        }
    }
}

impl<T: Transport> Drop for GameClient<T> {
    fn drop(&mut self) {
        // No executor context here, so a graceful close is not possible;
        // aborting the loop task is.
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

/// The inbound event loop. Every transport event is handled here, one at a
/// time, until the connection ends.
async fn run_inbound_loop<T: Transport>(
    transport: Arc<T>,
    dispatcher: Dispatcher,
    notifier: Arc<dyn Notifier>,
) {
    loop {
        match transport.next_event().await {
            Some(TransportEvent::Frame(text)) => dispatcher.handle_frame(&text),
            Some(TransportEvent::Failed(detail)) => {
                // Reported, not retried; the unclean close follows.
                notifier.alert("Connection error.");
                tracing::error!(%detail, "transport error");
            }
            Some(TransportEvent::Closed { clean: true, reason }) => {
                tracing::info!(%reason, "connection closed cleanly");
                break;
            }
            Some(TransportEvent::Closed { clean: false, reason }) => {
                notifier.alert(&format!("Connection closed unexpectedly: {reason}"));
                tracing::warn!(%reason, "connection closed uncleanly");
                break;
            }
            None => break,
        }
    }
}
