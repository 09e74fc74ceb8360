//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Missing required config key: [base.{0}]")]
    MissingKey(&'static str),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("issuepress.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("issuepress.toml"));

        let missing = ConfigError::MissingKey("avatar_url");
        assert_eq!(
            format!("{missing}"),
            "Missing required config key: [base.avatar_url]"
        );

        let validation_err = ConfigError::Validation("page_size must be at least 1".to_string());
        assert!(format!("{validation_err}").contains("page_size"));
    }
}
