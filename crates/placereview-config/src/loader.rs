//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::{Config, StorageBackend};

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load the file if present, fall back to defaults otherwise, then apply
    /// process environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Config, ConfigError> {
        let mut config = match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Config::default(),
            Err(e) => return Err(e),
        };
        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply environment-style overrides using the given lookup.
    ///
    /// Setting `REVIEW_STORE_URL` switches the backend to HTTP; setting
    /// `REVIEW_STORE_DIR` switches it to the filesystem.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(id) = get("PLACE_ID") {
            config.target.id = Some(id);
        }
        if let Some(dir) = get("REVIEW_STORE_DIR") {
            config.storage.backend = StorageBackend::Fs;
            config.storage.dir = Some(PathBuf::from(Self::expand_path(&dir)));
        }
        if let Some(url) = get("REVIEW_STORE_URL") {
            config.storage.backend = StorageBackend::Http;
            config.storage.url = Some(url);
        }
        if let Some(token) = get("REVIEW_STORE_TOKEN") {
            config.storage.token = Some(token);
        }
        if let Some(prefix) = get("REVIEW_KEY_PREFIX") {
            config.storage.key_prefix = Some(prefix);
        }
        if let Some(locale) = get("REVIEW_LOCALE") {
            config.browser.locale = locale;
        }
        if let Some(timezone) = get("REVIEW_TIMEZONE") {
            config.browser.timezone = timezone;
        }
        if let Some(path) = get("CHROME_PATH") {
            config.browser.chrome_path = Some(PathBuf::from(Self::expand_path(&path)));
        }
        if let Some(endpoint) = get("CDP_ENDPOINT") {
            config.browser.endpoint = Some(endpoint);
        }
        if let Some(headless) = get("HEADLESS") {
            config.browser.headless = Self::parse_bool("HEADLESS", &headless)?;
        }

        Ok(())
    }

    fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a boolean, got '{}'", other),
            }),
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::Rejected(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/reviews`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
