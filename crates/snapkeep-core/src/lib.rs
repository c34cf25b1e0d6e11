//! Retention engine for snapkeep
//!
//! This crate decides which timestamped backups to keep:
//! - Calendar buckets per granularity (day, month, year)
//! - Keep rules: newest per bucket, newest buckets first, oldest as anchor
//! - The rule cascade (daily -> monthly -> yearly) and its result
//!
//! Nothing here touches the filesystem.

mod bucket;
mod engine;
mod entry;
mod rule;

pub use bucket::*;
pub use engine::*;
pub use entry::*;
pub use rule::*;
