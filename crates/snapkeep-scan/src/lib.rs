//! Backup discovery for snapkeep
//!
//! Provides:
//! - The `EntrySource` seam the CLI reads backups through
//! - A filesystem traverser for timestamp-named directories
//! - Fixture seeding for test repositories

mod seed;
mod traverse;

pub use seed::*;
pub use traverse::*;

use snapkeep_util::SnapkeepError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading a backup root
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ScanResult<T> = Result<T, ScanError>;

/// Errors while seeding a test repository
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Invalid date range '{arg}': {reason}")]
    InvalidRange { arg: String, reason: String },

    #[error("Step must be at least one day")]
    ZeroStep,

    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pattern(#[from] SnapkeepError),
}

impl SeedError {
    pub fn range(arg: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            arg: arg.into(),
            reason: reason.into(),
        }
    }
}

pub type SeedResult<T> = Result<T, SeedError>;
