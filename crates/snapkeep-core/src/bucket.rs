//! Calendar buckets
//!
//! A bucket key truncates a timestamp to a calendar boundary in the offset
//! the timestamp was written in, so `2000-01-01T00-30-00+0100` belongs to
//! 2000-01-01 even though it is still 1999 in UTC. Keys are built from
//! calendar fields, so ordering and equality follow the calendar and never
//! depend on timestamp arithmetic.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone};
use snapkeep_config::RetentionPolicy;
use std::collections::BTreeMap;
use std::fmt;

use crate::Candidate;

/// Retention granularity, finest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Granularity {
    Daily,
    Monthly,
    Yearly,
}

impl Granularity {
    /// Order in which rules are applied
    pub const CASCADE: [Granularity; 3] = [
        Granularity::Daily,
        Granularity::Monthly,
        Granularity::Yearly,
    ];

    /// Bucket key of `ts` at this granularity, from its wall-clock date
    pub fn bucket_key<Tz: TimeZone>(self, ts: &DateTime<Tz>) -> BucketKey {
        match self {
            Granularity::Daily => BucketKey::new(ts.year(), ts.ordinal()),
            Granularity::Monthly => BucketKey::new(ts.year(), ts.month()),
            Granularity::Yearly => BucketKey::new(ts.year(), 0),
        }
    }

    /// Count configured for this granularity, None when unset
    pub fn keep_count(self, policy: &RetentionPolicy) -> Option<u32> {
        match self {
            Granularity::Daily => policy.keep_daily,
            Granularity::Monthly => policy.keep_monthly,
            Granularity::Yearly => policy.keep_yearly,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Monthly => write!(f, "monthly"),
            Granularity::Yearly => write!(f, "yearly"),
        }
    }
}

/// Truncated calendar position: the year plus a unit within it (day of
/// year, month, or 0 for whole years). Ordered by year, then unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    year: i32,
    unit: u32,
}

impl BucketKey {
    pub fn new(year: i32, unit: u32) -> Self {
        Self { year, unit }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }
}

/// Group candidates by key. Each bucket lists candidate positions in input
/// order; iterating the map goes from the oldest bucket to the newest.
pub fn group_by<F>(candidates: &[Candidate], key_of: F) -> BTreeMap<BucketKey, Vec<usize>>
where
    F: Fn(&DateTime<FixedOffset>) -> BucketKey,
{
    let mut buckets: BTreeMap<BucketKey, Vec<usize>> = BTreeMap::new();

    for (idx, candidate) in candidates.iter().enumerate() {
        buckets
            .entry(key_of(candidate.timestamp()))
            .or_default()
            .push(idx);
    }

    buckets
}
