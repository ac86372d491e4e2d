//! Client WebSocket transport using `tokio-tungstenite`.

use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::{Transport, TransportError, TransportEvent};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Reader half plus the small state machine that sequences
/// error → unclean-close → end-of-stream.
struct Source {
    inner: SplitStream<WsStream>,
    /// Close event owed to the caller after a `Failed` was returned.
    pending_close: Option<(bool, String)>,
    done: bool,
}

/// A connected client WebSocket.
///
/// The sink and reader halves are guarded separately, so a send never waits
/// on a reader parked in [`Transport::next_event`].
pub struct WebSocketLink {
    sink: Mutex<SplitSink<WsStream, Message>>,
    source: Mutex<Source>,
    open: AtomicBool,
}

impl WebSocketLink {
    /// Opens a WebSocket to the given `ws://` or `wss://` URL.
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let (ws, _) = tokio_tungstenite::connect_async(url).await.map_err(|e| {
            TransportError::ConnectFailed(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                e,
            ))
        })?;
        tracing::info!(url, "WebSocket connection established");

        let (sink, stream) = ws.split();
        Ok(Self {
            sink: Mutex::new(sink),
            source: Mutex::new(Source {
                inner: stream,
                pending_close: None,
                done: false,
            }),
            open: AtomicBool::new(true),
        })
    }
}

impl Transport for WebSocketLink {
    type Error = TransportError;

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    async fn send(&self, text: &str) -> Result<(), TransportError> {
        self.sink
            .lock()
            .await
            .send(Message::Text(text.to_owned().into()))
            .await
            .map_err(|e| {
                self.open.store(false, Ordering::Release);
                TransportError::SendFailed(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    e,
                ))
            })
    }

    async fn next_event(&self) -> Option<TransportEvent> {
        let mut source = self.source.lock().await;
        if source.done {
            return None;
        }
        if let Some((clean, reason)) = source.pending_close.take() {
            source.done = true;
            return Some(TransportEvent::Closed { clean, reason });
        }

        loop {
            match source.inner.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Some(TransportEvent::Frame(text.to_string()));
                }
                Some(Ok(Message::Close(frame))) => {
                    self.open.store(false, Ordering::Release);
                    source.done = true;
                    let reason = frame.map(|f| f.reason.to_string()).unwrap_or_default();
                    tracing::debug!(%reason, "received close frame");
                    return Some(TransportEvent::Closed {
                        clean: true,
                        reason,
                    });
                }
                Some(Ok(other)) => {
                    // ping/pong/binary — nothing the protocol layer wants
                    tracing::debug!(kind = ?std::mem::discriminant(&other), "skipping non-text frame");
                    continue;
                }
                Some(Err(e)) => {
                    // Mirror the browser's ordering: the error event first,
                    // the unclean close on the next call.
                    self.open.store(false, Ordering::Release);
                    let detail = e.to_string();
                    source.pending_close = Some((false, detail.clone()));
                    return Some(TransportEvent::Failed(detail));
                }
                None => {
                    self.open.store(false, Ordering::Release);
                    source.done = true;
                    return Some(TransportEvent::Closed {
                        clean: false,
                        reason: "connection dropped without a close handshake".to_owned(),
                    });
                }
            }
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.open.store(false, Ordering::Release);
        self.sink.lock().await.close().await.map_err(|e| {
            TransportError::CloseFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }
}
