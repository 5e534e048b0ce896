//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Configuration rejected: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_culprit() {
        let err = ConfigError::EnvVarNotSet("REVIEW_STORE_TOKEN".to_string());
        assert_eq!(err.to_string(), "Environment variable not set: REVIEW_STORE_TOKEN");

        let err = ConfigError::InvalidValue {
            field: "HEADLESS".to_string(),
            message: "expected true or false".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for HEADLESS: expected true or false");
    }

    #[test]
    fn test_toml_error_converts() {
        let err: ConfigError = toml::from_str::<toml::Value>("crawl = [").unwrap_err().into();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
