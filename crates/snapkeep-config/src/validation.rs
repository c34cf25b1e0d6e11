//! Configuration validation

use crate::policy::Activation;
use crate::schema::{RawConfig, RawRetention, RawSourceConfig};
use snapkeep_util::validate_pattern;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Invalid timestamp pattern '{value}': {message}")]
    InvalidPattern { value: String, message: String },

    #[error("Unknown activation '{0}' (expected \"per_granularity\" or \"require_all\")")]
    UnknownActivation(String),

    #[error("Source path cannot be empty")]
    EmptySourcePath,
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_source(&config.source));
    errors.extend(validate_retention(&config.retention));

    errors
}

fn validate_source(source: &RawSourceConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(path) = &source.path {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptySourcePath);
        }
    }

    if let Some(pattern) = &source.pattern {
        if let Err(e) = validate_pattern(pattern) {
            errors.push(ValidationError::InvalidPattern {
                value: pattern.clone(),
                message: e.to_string(),
            });
        }
    }

    errors
}

fn validate_retention(retention: &RawRetention) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(activation) = &retention.activation {
        if let Err(e) = parse_activation(activation) {
            errors.push(e);
        }
    }

    errors
}

/// Parse an activation name
pub fn parse_activation(s: &str) -> Result<Activation, ValidationError> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "per_granularity" => Ok(Activation::PerGranularity),
        "require_all" | "all_or_nothing" => Ok(Activation::RequireAll),
        _ => Err(ValidationError::UnknownActivation(s.to_string())),
    }
}
