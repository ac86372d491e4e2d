//! The handshake readiness cell.

use tokio::sync::watch;

/// The server-advertised algorithm catalog, as a resolve-at-most-once cell.
///
/// Two states:
///
/// ```text
///   Pending ──(first handshake)──→ Resolved(catalog)
/// ```
///
/// [`resolve`](Self::resolve) makes the transition exactly once; awaiting
/// via [`wait`](Self::wait) before or after it observes the same value, and
/// later resolutions leave the cell untouched. There is no timeout and no
/// cancellation: a caller that waits before the handshake arrives waits
/// until it does, or forever.
#[derive(Debug, Clone)]
pub struct AlgorithmCatalog {
    cell: watch::Sender<Option<Vec<String>>>,
}

impl AlgorithmCatalog {
    pub fn new() -> Self {
        Self {
            cell: watch::Sender::new(None),
        }
    }

    /// Resolves the cell with the server's catalog.
    ///
    /// Returns false — and changes nothing observable — when the cell is
    /// already resolved: the first catalog wins.
    pub fn resolve(&self, algorithms: Vec<String>) -> bool {
        let resolved = self.cell.send_if_modified(|cell| {
            if cell.is_some() {
                return false;
            }
            *cell = Some(algorithms);
            true
        });

        if resolved {
            tracing::info!("algorithm catalog resolved");
        } else {
            tracing::debug!("catalog already resolved; keeping the first value");
        }
        resolved
    }

    /// Whether the handshake has arrived.
    pub fn is_resolved(&self) -> bool {
        self.cell.borrow().is_some()
    }

    /// The resolved catalog, if any, without waiting.
    pub fn peek(&self) -> Option<Vec<String>> {
        self.cell.borrow().clone()
    }

    /// Waits until the cell resolves, then returns the catalog.
    ///
    /// Returns immediately once resolved, however many times it is called
    /// and from however many tasks.
    pub async fn wait(&self) -> Vec<String> {
        let mut rx = self.cell.subscribe();
        let guard = rx
            .wait_for(Option::is_some)
            .await
            .expect("cell sender is held by self");
        guard.clone().expect("wait_for yields only resolved cells")
    }
}

impl Default for AlgorithmCatalog {
    fn default() -> Self {
        Self::new()
    }
}
