//! Error types for snapkeep

use thiserror::Error;

/// Core error type for snapkeep operations
#[derive(Debug, Error)]
pub enum SnapkeepError {
    #[error("Invalid timestamp pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Timestamp cannot be formatted with pattern '{0}'")]
    UnformattableTimestamp(String),
}

impl SnapkeepError {
    pub fn pattern(pattern: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: msg.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapkeepError>;
