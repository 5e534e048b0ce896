//! Script evaluation.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::Evaluation;

use super::core::PageSession;

impl PageSession {
    /// Evaluate `expression`, awaiting promises, and return its JSON value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let reply = self
            .call(
                "Runtime.evaluate",
                json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                }),
            )
            .await?;

        let evaluation: Evaluation = serde_json::from_value(reply)?;
        match evaluation.exception_details {
            Some(thrown) => Err(CdpError::Script(thrown.message())),
            None => Ok(evaluation.result.value),
        }
    }

    /// Run `source` in every new document before the page's own scripts.
    pub async fn add_init_script(&self, source: &str) -> Result<(), CdpError> {
        self.call(
            "Page.addScriptToEvaluateOnNewDocument",
            json!({"source": source}),
        )
        .await?;
        Ok(())
    }
}
