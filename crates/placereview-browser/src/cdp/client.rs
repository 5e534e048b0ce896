//! Browser-level DevTools connection.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use super::error::CdpError;
use super::protocol::VersionInfo;
use super::session::PageSession;
use super::transport::Transport;

/// Connection to one browser, able to open and close page targets.
pub struct CdpClient {
    transport: Arc<Transport>,
}

impl CdpClient {
    /// Connect through the HTTP debug endpoint, e.g. `http://127.0.0.1:9222`.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let version = Self::version(endpoint).await?;
        debug!("Found {} at {}", version.browser, endpoint);

        let transport = Transport::connect(&version.ws_url).await?;
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    /// `GET /json/version`; succeeds only while a browser is listening.
    pub async fn version(endpoint: &str) -> Result<VersionInfo, CdpError> {
        let url = format!("{}/json/version", endpoint.trim_end_matches('/'));
        let unreachable = |e: reqwest::Error| CdpError::Unreachable(format!("{}: {}", url, e));

        reqwest::get(&url)
            .await
            .map_err(unreachable)?
            .json()
            .await
            .map_err(unreachable)
    }

    /// Open a blank tab and attach a flattened session to it.
    pub async fn new_page(&self) -> Result<PageSession, CdpError> {
        let created = self
            .transport
            .call(None, "Target.createTarget", json!({"url": "about:blank"}))
            .await?;
        let target_id = string_field(&created, "targetId")?;

        let attached = self
            .transport
            .call(
                None,
                "Target.attachToTarget",
                json!({"targetId": target_id, "flatten": true}),
            )
            .await?;
        let session_id = string_field(&attached, "sessionId")?;
        debug!("Attached session {} to target {}", session_id, target_id);

        let session = PageSession::new(target_id, session_id, self.transport.clone());
        session.enable().await?;
        Ok(session)
    }

    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.transport
            .call(None, "Target.closeTarget", json!({"targetId": target_id}))
            .await?;
        Ok(())
    }
}

fn string_field(reply: &Value, name: &str) -> Result<String, CdpError> {
    reply[name]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CdpError::UnexpectedReply(format!("missing {}", name)))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
