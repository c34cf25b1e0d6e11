//! Seeding test repositories
//!
//! Creates one timestamp-named directory per date in a set of date ranges,
//! the way a backup job running on a schedule would have left them.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use snapkeep_util::format_timestamp;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::{SeedError, SeedResult};

/// Separator between the two ends of a range argument
pub const RANGE_SEPARATOR: &str = "...";

/// Pattern `seed-repo` names directories with unless told otherwise
pub const DEFAULT_SEED_PATTERN: &str = "%Y-%m-%dT%H-%M-%S%.3fZ";

/// Inclusive range of dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// A range covering a single date
    pub fn single(date: DateTime<Utc>) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    /// Dates from `from` to `to`, `step` apart
    pub fn iter(&self, step: Duration) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        std::iter::successors(Some(self.from), move |d| Some(*d + step))
            .take_while(move |d| *d <= self.to)
    }
}

/// Parse range arguments: `2000-01-01`, `2000-01-01...2000-01-31`, or the
/// same with RFC 3339 date-times.
pub fn parse_date_ranges<I, S>(args: I) -> SeedResult<Vec<DateRange>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| parse_date_range(arg.as_ref()))
        .collect()
}

fn parse_date_range(arg: &str) -> SeedResult<DateRange> {
    let parts: Vec<&str> = arg.split(RANGE_SEPARATOR).collect();

    match parts.as_slice() {
        [date] => Ok(DateRange::single(parse_date(arg, date)?)),
        [from, to] => Ok(DateRange {
            from: parse_date(arg, from)?,
            to: parse_date(arg, to)?,
        }),
        _ => Err(SeedError::range(
            arg,
            format!("expected a date or two dates separated by '{}'", RANGE_SEPARATOR),
        )),
    }
}

fn parse_date(arg: &str, value: &str) -> SeedResult<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SeedError::range(arg, format!("'{}' is not a date: {}", value, e)))
}

/// Create a directory under `root` for every date in `ranges`, `step_days`
/// apart, named with `pattern`. Returns the names in creation order.
pub fn seed_repository(
    root: &Path,
    pattern: &str,
    ranges: &[DateRange],
    step_days: u32,
) -> SeedResult<Vec<String>> {
    if step_days == 0 {
        return Err(SeedError::ZeroStep);
    }
    let step = Duration::days(i64::from(step_days));

    let create = |path: &Path| {
        fs::create_dir_all(path).map_err(|source| SeedError::Create {
            path: path.to_path_buf(),
            source,
        })
    };

    create(root)?;

    let mut names = Vec::new();
    for range in ranges {
        for date in range.iter(step) {
            let name = format_timestamp(&date, pattern)?;
            create(&root.join(&name))?;
            names.push(name);
        }
    }

    debug!(root = %root.display(), count = names.len(), "Seeded repository");
    Ok(names)
}
