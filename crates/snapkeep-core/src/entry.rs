//! Backup entries and prune candidates

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A backup found on disk: its directory name, full path and the timestamp
/// parsed from the name, with the offset the name was written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampedEntry {
    pub name: String,
    pub path: PathBuf,
    pub timestamp: DateTime<FixedOffset>,
}

impl TimestampedEntry {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        timestamp: impl Into<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// An entry under evaluation. Starts out pruned; rules may mark it kept,
/// and nothing ever unmarks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub entry: TimestampedEntry,
    keep: bool,
}

impl Candidate {
    pub fn new(entry: TimestampedEntry) -> Self {
        Self { entry, keep: false }
    }

    pub fn is_kept(&self) -> bool {
        self.keep
    }

    pub fn path(&self) -> &Path {
        &self.entry.path
    }

    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.entry.timestamp
    }

    /// Mark as kept. Returns true if it was not kept before.
    pub(crate) fn mark_kept(&mut self) -> bool {
        !std::mem::replace(&mut self.keep, true)
    }
}

impl From<TimestampedEntry> for Candidate {
    fn from(entry: TimestampedEntry) -> Self {
        Self::new(entry)
    }
}
