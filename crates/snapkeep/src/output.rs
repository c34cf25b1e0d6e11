//! Reporting a retention result

use serde::Serialize;
use snapkeep_core::{Candidate, RetentionResult};
use std::io::{self, Write};

/// How the result is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One prune target per line
    PruneList,
    /// Every entry annotated, followed by totals
    Verbose,
    /// The whole result as JSON
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    kept: Vec<&'a Candidate>,
    pruned: Vec<&'a Candidate>,
}

/// Print `result` in `mode`. Listings go to `out`, per-entry annotations of
/// the verbose mode to `err`. Entries are listed sorted by path.
pub fn write_result(
    result: &RetentionResult,
    mode: OutputMode,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    match mode {
        OutputMode::PruneList => {
            for candidate in result.by_path.values().filter(|c| !c.is_kept()) {
                writeln!(out, "{}", candidate.path().display())?;
            }
        }
        OutputMode::Verbose => {
            for candidate in result.by_path.values() {
                let verdict = if candidate.is_kept() { "keep" } else { "prune" };
                writeln!(err, "{}: {}", candidate.path().display(), verdict)?;
            }
            writeln!(
                out,
                "Total count: keep: {}, prune: {}",
                result.kept.len(),
                result.pruned.len()
            )?;
        }
        OutputMode::Json => {
            let (kept, pruned): (Vec<_>, Vec<_>) =
                result.by_path.values().partition(|c| c.is_kept());
            serde_json::to_writer_pretty(&mut *out, &JsonReport { kept, pruned })?;
            writeln!(out)?;
        }
    }

    Ok(())
}
