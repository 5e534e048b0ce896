//! Chrome discovery, launch, and per-page profile setup.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use placereview_config::BrowserConfig;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cdp::{CdpClient, PageSession};
use crate::error::BrowserError;
use crate::page::{BrowserLauncher, BrowserPage};
use crate::scripts;

use super::cdp_page::{CdpPage, LaunchedChrome};

const LAUNCH_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Opens pages either on an existing CDP endpoint or on a Chrome it spawns.
pub struct ChromeLauncher {
    config: BrowserConfig,
}

impl ChromeLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Find a Chrome executable, preferring an explicitly configured one.
    pub fn find_chrome(configured: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = configured {
            return path.exists().then(|| path.to_path_buf());
        }

        #[cfg(target_os = "macos")]
        let candidates: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ];

        #[cfg(target_os = "linux")]
        let candidates: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/opt/chrome/chrome",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let candidates: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let candidates: &[&str] = &[];

        candidates
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    /// Debug endpoint of a Chrome this launcher spawns.
    pub fn local_endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.config.debug_port)
    }

    async fn is_chrome_running(endpoint: &str) -> bool {
        CdpClient::version(endpoint).await.is_ok()
    }

    /// Launch Chrome with remote debugging on a throwaway profile.
    async fn launch_chrome(&self) -> Result<LaunchedChrome, BrowserError> {
        let chrome_path = Self::find_chrome(self.config.chrome_path.as_deref())
            .ok_or(BrowserError::ChromeNotFound)?;
        let profile_dir = std::env::temp_dir().join(format!("placereview-{}", Uuid::new_v4()));

        if let Err(e) = tokio::fs::create_dir_all(&profile_dir).await {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg(format!(
                "--window-size={},{}",
                self.config.viewport_width, self.config.viewport_height
            ))
            .arg(format!("--lang={}", self.config.locale))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--no-sandbox")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child: Child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        let mut launched = LaunchedChrome { child, profile_dir };

        let endpoint = self.local_endpoint();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(self.config.launch_timeout_secs);
        while !Self::is_chrome_running(&endpoint).await {
            if tokio::time::Instant::now() >= deadline {
                launched.shutdown().await;
                return Err(BrowserError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
            tokio::time::sleep(LAUNCH_POLL_INTERVAL).await;
        }

        Ok(launched)
    }

    /// Apply the configured locale, timezone, viewport, and request rules.
    async fn apply_profile(&self, session: &PageSession) -> Result<(), BrowserError> {
        let config = &self.config;
        let accept_language = config
            .extra_headers
            .get("Accept-Language")
            .cloned()
            .unwrap_or_else(|| config.locale.clone());

        session
            .set_user_agent(&config.user_agent, &accept_language)
            .await?;
        session.set_locale(&config.locale, &config.timezone).await?;
        session
            .set_viewport(config.viewport_width, config.viewport_height)
            .await?;
        session.set_extra_headers(&config.extra_headers).await?;
        session.block_urls(&config.block_urls).await?;
        if config.mask_webdriver {
            session.add_init_script(scripts::MASK_WEBDRIVER).await?;
        }

        debug!(
            "Applied browser profile: locale={}, timezone={}, blocked={}",
            config.locale,
            config.timezone,
            config.block_urls.len()
        );
        Ok(())
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn open_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        let (endpoint, launched) = match &self.config.endpoint {
            Some(endpoint) => {
                info!("Connecting to existing browser at {}", endpoint);
                (endpoint.clone(), None)
            }
            None => {
                let endpoint = self.local_endpoint();
                if Self::is_chrome_running(&endpoint).await {
                    info!("Chrome already running on port {}", self.config.debug_port);
                    (endpoint, None)
                } else {
                    info!("Chrome not running on port {}, launching...", self.config.debug_port);
                    (endpoint, Some(self.launch_chrome().await?))
                }
            }
        };

        let page = async {
            let client = CdpClient::connect(&endpoint).await?;
            let session = client.new_page().await?;
            Ok::<_, BrowserError>((client, session))
        }
        .await;

        let (client, session) = match page {
            Ok(pair) => pair,
            Err(e) => {
                if let Some(mut launched) = launched {
                    launched.shutdown().await;
                }
                return Err(e);
            }
        };

        let page = CdpPage::new(client, session, launched);
        if let Err(e) = self.apply_profile(page.session()).await {
            let _ = page.close().await;
            return Err(e);
        }

        info!("Opened page {} on {}", page.session().target_id(), endpoint);
        Ok(Box::new(page))
    }
}
