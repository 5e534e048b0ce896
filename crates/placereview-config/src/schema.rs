//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(default)]
    pub crawl: CrawlConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which listing to crawl and how to reach its review view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Target identifier, usually supplied by the invocation event instead.
    #[serde(default)]
    pub id: Option<String>,

    /// Review page URL; `{target}` is replaced with the identifier.
    #[serde(default = "default_url_template")]
    pub url_template: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            id: None,
            url_template: default_url_template(),
        }
    }
}

impl TargetConfig {
    /// Render the review URL for a target identifier.
    pub fn review_url(&self, target_id: &str) -> String {
        self.url_template.replace("{target}", target_id)
    }
}

fn default_url_template() -> String {
    "https://pcmap.place.naver.com/restaurant/{target}/review/visitor".to_string()
}

/// Browser launch and page profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Existing CDP endpoint to connect to instead of launching Chrome.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Chrome executable; detected from well-known paths when unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_launch_timeout")]
    pub launch_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    #[serde(default = "default_extra_headers")]
    pub extra_headers: BTreeMap<String, String>,

    /// URL patterns the page must never request (view counters, trackers).
    #[serde(default = "default_block_urls")]
    pub block_urls: Vec<String>,

    /// Hide `navigator.webdriver` from page scripts.
    #[serde(default = "default_true")]
    pub mask_webdriver: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            chrome_path: None,
            debug_port: default_debug_port(),
            headless: true,
            launch_timeout_secs: default_launch_timeout(),
            user_agent: default_user_agent(),
            locale: default_locale(),
            timezone: default_timezone(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            extra_headers: default_extra_headers(),
            block_urls: default_block_urls(),
            mask_webdriver: true,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_true() -> bool {
    true
}

fn default_launch_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36".to_string()
}

fn default_locale() -> String {
    "ko-KR".to_string()
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

fn default_extra_headers() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "Accept-Language".to_string(),
        "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
    )])
}

fn default_block_urls() -> Vec<String> {
    vec!["*/rest/visitorReview/views*".to_string()]
}

/// CSS selectors locating the review list and its fields.
///
/// Field selectors are evaluated relative to each review item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_container")]
    pub container: String,

    #[serde(default = "default_item")]
    pub item: String,

    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_text")]
    pub text: String,

    #[serde(default = "default_date")]
    pub date: String,

    #[serde(default)]
    pub rating: Option<String>,

    #[serde(default = "default_images")]
    pub images: String,

    #[serde(default = "default_image_attribute")]
    pub image_attribute: String,

    /// "Load more" button; the container is scrolled when absent or hidden.
    #[serde(default = "default_load_more")]
    pub load_more: Option<String>,

    /// Per-review "show more" toggle that expands truncated bodies.
    #[serde(default = "default_expand_text")]
    pub expand_text: Option<String>,

    /// Sort option links; the one labelled `sort_label` is clicked once.
    #[serde(default = "default_sort_option")]
    pub sort_option: Option<String>,

    #[serde(default = "default_sort_label")]
    pub sort_label: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            item: default_item(),
            author: default_author(),
            text: default_text(),
            date: default_date(),
            rating: None,
            images: default_images(),
            image_attribute: default_image_attribute(),
            load_more: default_load_more(),
            expand_text: default_expand_text(),
            sort_option: default_sort_option(),
            sort_label: default_sort_label(),
        }
    }
}

fn default_container() -> String {
    "ul#_review_list".to_string()
}

fn default_item() -> String {
    "ul#_review_list > li.EjjAW".to_string()
}

fn default_author() -> String {
    "span.pui__NMi-Dp".to_string()
}

fn default_text() -> String {
    "div.pui__vn15t2 > a".to_string()
}

fn default_date() -> String {
    "time".to_string()
}

fn default_images() -> String {
    "div.pui__RuLAax img".to_string()
}

fn default_image_attribute() -> String {
    "src".to_string()
}

fn default_load_more() -> Option<String> {
    Some("div.NSTUp a.fvwqf".to_string())
}

fn default_expand_text() -> Option<String> {
    Some("a.pui__wFzIYl[data-pui-click-code='rvshowmore']".to_string())
}

fn default_sort_option() -> Option<String> {
    Some("a.place_btn_option".to_string())
}

fn default_sort_label() -> String {
    "최신순".to_string()
}

/// What to do once a scroll or extract step has exhausted its retries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Skip the step, keep collecting, and mark the result truncated.
    #[default]
    FailSoft,
    /// Abort the whole session.
    FailHard,
}

/// Crawl loop bounds and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    #[serde(default = "default_max_duration")]
    pub max_duration_secs: u64,

    /// Bounded wait for the review container to render.
    #[serde(default = "default_render_timeout")]
    pub render_timeout_ms: u64,

    #[serde(default = "default_settle_timeout")]
    pub settle_timeout_ms: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Upper bound for a single browser round trip.
    #[serde(default = "default_interaction_timeout")]
    pub interaction_timeout_ms: u64,

    /// Pause after clicking the sort option.
    #[serde(default = "default_sort_settle")]
    pub sort_settle_ms: u64,

    /// Smallest all-unreadable pass treated as markup drift.
    #[serde(default = "default_drift_min_nodes")]
    pub drift_min_nodes: usize,

    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            max_duration_secs: default_max_duration(),
            render_timeout_ms: default_render_timeout(),
            settle_timeout_ms: default_settle_timeout(),
            poll_interval_ms: default_poll_interval(),
            interaction_timeout_ms: default_interaction_timeout(),
            sort_settle_ms: default_sort_settle(),
            drift_min_nodes: default_drift_min_nodes(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

fn default_max_iterations() -> u32 {
    200
}

fn default_max_duration() -> u64 {
    600
}

fn default_render_timeout() -> u64 {
    10_000
}

fn default_settle_timeout() -> u64 {
    2_000
}

fn default_poll_interval() -> u64 {
    200
}

fn default_interaction_timeout() -> u64 {
    15_000
}

fn default_sort_settle() -> u64 {
    2_000
}

fn default_drift_min_nodes() -> usize {
    3
}

/// Retry policy applied to every DOM interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay(),
            max_delay_ms: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay() -> u64 {
    500
}

fn default_max_delay() -> u64 {
    8_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Object storage backend kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local directory.
    #[default]
    Fs,
    /// HTTP PUT endpoint.
    Http,
}

/// How result keys are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// `{target}/{collectedAt}.json`, one object per run.
    #[default]
    Timestamped,
    /// `{target}/latest.json`, overwritten on every run.
    Latest,
}

/// Result storage destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub key_prefix: Option<String>,

    #[serde(default)]
    pub key_scheme: KeyScheme,

    #[serde(default = "default_publish_retry_delay")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dir: Some(PathBuf::from("reviews")),
            url: None,
            token: None,
            key_prefix: None,
            key_scheme: KeyScheme::default(),
            retry_delay_ms: default_publish_retry_delay(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_publish_retry_delay() -> u64 {
    1_000
}

fn default_request_timeout() -> u64 {
    30
}

/// Log output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily-rotated log files; console only when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Emit JSON lines on the console.
    #[serde(default)]
    pub json: bool,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
