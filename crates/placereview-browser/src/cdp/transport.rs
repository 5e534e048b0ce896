//! Request/reply multiplexing over one DevTools WebSocket.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use super::error::CdpError;
use super::protocol::{Command, Frame};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Reply = oneshot::Sender<Result<Value, CdpError>>;
pub(crate) type Inflight = Mutex<HashMap<u64, Reply>>;

/// Upper bound for one command round trip.
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) struct Transport {
    sink: tokio::sync::Mutex<SplitSink<Socket, Message>>,
    inflight: Arc<Inflight>,
    next_id: AtomicU64,
    reader: JoinHandle<()>,
}

impl Transport {
    pub(crate) async fn connect(ws_url: &str) -> Result<Self, CdpError> {
        let (socket, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| CdpError::Unreachable(format!("{}: {}", ws_url, e)))?;
        let (sink, source) = socket.split();

        let inflight: Arc<Inflight> = Arc::default();
        let reader = tokio::spawn(read_frames(source, inflight.clone()));
        debug!("DevTools socket open at {}", ws_url);

        Ok(Self {
            sink: tokio::sync::Mutex::new(sink),
            inflight,
            next_id: AtomicU64::new(1),
            reader,
        })
    }

    /// Send `method` and wait for its reply. `session_id` targets an
    /// attached page; `None` addresses the browser itself.
    pub(crate) async fn call(
        &self,
        session_id: Option<&str>,
        method: &str,
        params: Value,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let text = serde_json::to_string(&Command {
            id,
            method,
            params,
            session_id,
        })?;
        trace!(">> {}", text);

        let (tx, rx) = oneshot::channel();
        self.inflight.lock().insert(id, tx);

        let sent = self.sink.lock().await.send(Message::Text(text.into())).await;
        if let Err(e) = sent {
            self.inflight.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(CALL_TIMEOUT, rx).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) => Err(CdpError::Closed),
            Err(_) => {
                self.inflight.lock().remove(&id);
                Err(CdpError::Timeout(method.to_string()))
            }
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn read_frames(mut source: SplitStream<Socket>, inflight: Arc<Inflight>) {
    while let Some(message) = source.next().await {
        match message {
            Ok(Message::Text(text)) => {
                trace!("<< {}", text);
                match serde_json::from_str::<Frame>(&text) {
                    Ok(frame) => {
                        settle(&inflight, frame);
                    }
                    Err(e) => warn!("Unreadable DevTools frame: {}", e),
                }
            }
            Ok(Message::Close(_)) => {
                debug!("DevTools socket closed by browser");
                break;
            }
            Err(e) => {
                warn!("DevTools socket failed: {}", e);
                break;
            }
            Ok(_) => {}
        }
    }

    // Callers waiting on a dead socket fail now instead of at CALL_TIMEOUT.
    let orphans: Vec<Reply> = inflight.lock().drain().map(|(_, tx)| tx).collect();
    for tx in orphans {
        let _ = tx.send(Err(CdpError::Closed));
    }
}

/// Hand a reply to its waiting caller. Events and stale replies are dropped.
pub(crate) fn settle(inflight: &Inflight, frame: Frame) -> bool {
    let Some(id) = frame.id else {
        return false;
    };
    let Some(tx) = inflight.lock().remove(&id) else {
        return false;
    };

    let reply = match frame.error {
        Some(fault) => Err(CdpError::Remote {
            code: fault.code,
            message: fault.message,
        }),
        None => Ok(frame.result),
    };
    let _ = tx.send(reply);
    true
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
