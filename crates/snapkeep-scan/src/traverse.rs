//! Reading timestamped backups from a directory

use snapkeep_core::TimestampedEntry;
use snapkeep_util::parse_timestamp;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{ScanError, ScanResult};

/// Where backups come from
pub trait EntrySource {
    /// All backups this source knows about, in no particular order
    fn entries(&self) -> ScanResult<Vec<TimestampedEntry>>;
}

/// Lists the directories directly under `root` whose names carry a timestamp
#[derive(Debug, Clone)]
pub struct FileSystemTraverser {
    root: PathBuf,
    pattern: String,
}

impl FileSystemTraverser {
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl EntrySource for FileSystemTraverser {
    fn entries(&self) -> ScanResult<Vec<TimestampedEntry>> {
        debug!(root = %self.root.display(), pattern = %self.pattern, "Scanning backup root");

        let read_dir = |source: std::io::Error| ScanError::ReadDir {
            path: self.root.clone(),
            source,
        };

        let mut names = Vec::new();
        let mut total = 0usize;
        for dir_entry in fs::read_dir(&self.root).map_err(read_dir)? {
            let dir_entry = dir_entry.map_err(read_dir)?;
            total += 1;

            if !dir_entry.file_type().map_err(read_dir)?.is_dir() {
                continue;
            }

            match dir_entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => {
                    warn!(name = ?name, "Skipping directory with a non UTF-8 name");
                }
            }
        }

        let entries = parse_entries(&self.root, &self.pattern, names);

        if total > 0 && entries.is_empty() {
            warn!(
                root = %self.root.display(),
                pattern = %self.pattern,
                "No directory name matched the timestamp pattern, is the pattern right?"
            );
        }

        Ok(entries)
    }
}

/// Parse timestamps out of directory `names` under `root`. Names that do not
/// match `pattern` are skipped.
pub fn parse_entries<I, S>(root: &Path, pattern: &str, names: I) -> Vec<TimestampedEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            match parse_timestamp(name, pattern) {
                Ok(timestamp) => Some(TimestampedEntry::new(name, root.join(name), timestamp)),
                Err(e) => {
                    warn!(name = %name, error = %e, "Failed to parse timestamp from directory name");
                    None
                }
            }
        })
        .collect()
}
