//! DevTools protocol errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdpError {
    /// Nothing answering on the debug endpoint.
    #[error("DevTools endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("WebSocket error: {0}")]
    Socket(String),

    /// The browser rejected a command.
    #[error("Remote error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("Malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A page script threw.
    #[error("Script threw: {0}")]
    Script(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Connection closed")]
    Closed,
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::Socket(e.to_string())
    }
}
