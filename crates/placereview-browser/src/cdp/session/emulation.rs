//! Browser profile overrides applied right after attach.

use std::collections::BTreeMap;

use serde_json::json;

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Override the user agent string and the `Accept-Language` it reports.
    pub async fn set_user_agent(&self, user_agent: &str, accept_language: &str) -> Result<(), CdpError> {
        let params = json!({"userAgent": user_agent, "acceptLanguage": accept_language});
        self.call("Network.setUserAgentOverride", params).await?;
        Ok(())
    }

    /// `Intl` locale and timezone seen by page scripts.
    pub async fn set_locale(&self, locale: &str, timezone_id: &str) -> Result<(), CdpError> {
        self.call("Emulation.setLocaleOverride", json!({"locale": locale}))
            .await?;
        self.call("Emulation.setTimezoneOverride", json!({"timezoneId": timezone_id}))
            .await?;
        Ok(())
    }

    /// Desktop-sized layout viewport, so lazy lists load in full pages.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<(), CdpError> {
        let params = json!({
            "width": width,
            "height": height,
            "deviceScaleFactor": 1,
            "mobile": false,
        });
        self.call("Emulation.setDeviceMetricsOverride", params).await?;
        Ok(())
    }

    pub async fn set_extra_headers(&self, headers: &BTreeMap<String, String>) -> Result<(), CdpError> {
        if !headers.is_empty() {
            self.call("Network.setExtraHTTPHeaders", json!({"headers": headers}))
                .await?;
        }
        Ok(())
    }

    /// Fail requests matching any `*` wildcard pattern.
    pub async fn block_urls(&self, patterns: &[String]) -> Result<(), CdpError> {
        if !patterns.is_empty() {
            self.call("Network.setBlockedURLs", json!({"urls": patterns}))
                .await?;
        }
        Ok(())
    }
}
