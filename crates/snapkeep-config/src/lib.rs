//! Configuration parsing and validation for snapkeep
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Backup source (root directory, timestamp pattern)
//! - Retention counts per granularity and how unset counts gate pruning
//! - Validation with clear error messages

mod policy;
mod schema;
mod validation;

pub use policy::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Policy> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading configuration");

    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Policy> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Policy::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use snapkeep_util::DEFAULT_PATTERN;
    use std::io::Write;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1
        "#;

        let policy = parse_config(config).unwrap();
        assert!(policy.source.path.is_none());
        assert_eq!(policy.source.pattern, DEFAULT_PATTERN);
        assert!(policy.retention.is_unset());
        assert_eq!(policy.retention.activation, Activation::PerGranularity);
    }

    #[test]
    fn parse_retention_config() {
        let config = r#"
            config_version = 1

            [source]
            path = "/srv/backups"

            [retention]
            keep_daily = 14
            keep_monthly = 6
            keep_yearly = 1
            activation = "require_all"
        "#;

        let policy = parse_config(config).unwrap();
        assert_eq!(
            policy.retention,
            RetentionPolicy::new(Some(14), Some(6), Some(1))
                .with_activation(Activation::RequireAll)
        );
        assert!(policy.retention.is_active());
    }

    #[test]
    fn reject_wrong_version() {
        let config = r#"
            config_version = 99
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_pattern() {
        let config = r#"
            config_version = 1

            [source]
            pattern = "%Y-%m-%"
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "config_version = 1").unwrap();
        writeln!(file, "[retention]").unwrap();
        writeln!(file, "keep_daily = 3").unwrap();

        let policy = load_config(file.path()).unwrap();
        assert_eq!(policy.retention.keep_daily, Some(3));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
