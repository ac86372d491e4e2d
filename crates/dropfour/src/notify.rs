//! User-notification seam.
//!
//! The connection manager needs a place to alert the user — connection
//! trouble, malformed payloads, server-reported errors — but how an alert
//! is rendered (toast, status bar, dialog) belongs to the UI layer. The
//! [`Notifier`] trait is that seam; tests substitute a recording double.

/// Receives user-visible alerts from the connection manager.
///
/// Implementations must be cheap and non-blocking: alerts are emitted from
/// inside the inbound event loop.
pub trait Notifier: Send + Sync + 'static {
    /// Shows the message to the user.
    fn alert(&self, message: &str);
}

/// A [`Notifier`] that routes alerts to the log.
///
/// The default for headless use, and the fallback while a UI is not yet
/// attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        tracing::error!(target: "dropfour::alert", "{message}");
    }
}
