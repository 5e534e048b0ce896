//! Session handle and command dispatch.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::transport::Transport;

/// Commands sent through here are routed to the attached page.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a page-level command. Pass `Value::Null` when it takes no params.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, CdpError> {
        self.transport
            .call(Some(&self.session_id), method, params)
            .await
    }

    pub(crate) async fn enable(&self) -> Result<(), CdpError> {
        for method in ["Page.enable", "Runtime.enable", "Network.enable"] {
            self.call(method, Value::Null).await?;
        }
        debug!("Enabled Page/Runtime/Network for {}", self.target_id);
        Ok(())
    }
}
