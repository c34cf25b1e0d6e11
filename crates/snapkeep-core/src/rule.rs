//! Keep rules
//!
//! A rule walks its buckets from newest to oldest and keeps the newest
//! candidate of each bucket until `keep_count` candidates were newly kept.
//! A bucket whose newest candidate is already kept (by a finer rule) does not
//! count toward the quota; the walk moves on to older buckets instead.
//!
//! If the walk runs out of buckets before the quota is met, the oldest
//! candidate of the oldest bucket is kept as an anchor.

use std::collections::BTreeMap;

use crate::{BucketKey, Candidate, Granularity, group_by};

/// Keep the newest candidate of up to `keep_count` buckets at one granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepRule {
    pub granularity: Granularity,
    pub keep_count: u32,
}

/// What applying a rule did
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// The candidates, with this rule's marks applied
    pub candidates: Vec<Candidate>,
    /// Buckets that counted toward the quota
    pub satisfied: u32,
    /// Whether the anchor fallback marked a candidate
    pub anchored: bool,
}

impl RuleOutcome {
    /// Candidates this rule changed from pruned to kept
    pub fn newly_kept(&self) -> u32 {
        self.satisfied + u32::from(self.anchored)
    }
}

impl KeepRule {
    pub fn new(granularity: Granularity, keep_count: u32) -> Self {
        Self {
            granularity,
            keep_count,
        }
    }

    /// Apply the rule, taking the candidates and handing them back marked
    pub fn apply(&self, mut candidates: Vec<Candidate>) -> RuleOutcome {
        let buckets = self.buckets(&candidates);

        let mut satisfied = 0;
        for members in buckets.values().rev() {
            if satisfied == self.keep_count {
                break;
            }

            let Some(idx) = newest(&candidates, members) else {
                continue;
            };

            if candidates[idx].mark_kept() {
                satisfied += 1;
            }
        }

        let mut anchored = false;
        if satisfied < self.keep_count {
            if let Some(idx) = buckets
                .values()
                .next()
                .and_then(|members| oldest(&candidates, members))
            {
                anchored = candidates[idx].mark_kept();
            }
        }

        RuleOutcome {
            candidates,
            satisfied,
            anchored,
        }
    }

    fn buckets(&self, candidates: &[Candidate]) -> BTreeMap<BucketKey, Vec<usize>> {
        let granularity = self.granularity;
        group_by(candidates, |ts| granularity.bucket_key(ts))
    }
}

/// Newest member; on equal timestamps the first one in bucket order
fn newest(candidates: &[Candidate], members: &[usize]) -> Option<usize> {
    members.iter().copied().reduce(|best, idx| {
        if candidates[idx].timestamp() > candidates[best].timestamp() {
            idx
        } else {
            best
        }
    })
}

/// Oldest member; on equal timestamps the first one in bucket order
fn oldest(candidates: &[Candidate], members: &[usize]) -> Option<usize> {
    members.iter().copied().reduce(|best, idx| {
        if candidates[idx].timestamp() < candidates[best].timestamp() {
            idx
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimestampedEntry;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn candidates(times: &[DateTime<Utc>]) -> Vec<Candidate> {
        times
            .iter()
            .enumerate()
            .map(|(i, ts)| {
                Candidate::new(TimestampedEntry::new(
                    format!("b{}", i),
                    format!("/foo/bar/b{}", i),
                    *ts,
                ))
            })
            .collect()
    }

    fn kept(list: &[Candidate]) -> Vec<usize> {
        list.iter()
            .enumerate()
            .filter(|(_, c)| c.is_kept())
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_keeps_newest_buckets_first() {
        let list = candidates(&[at(2000, 1, 1, 0), at(2000, 1, 2, 0), at(2000, 1, 3, 0)]);

        let outcome = KeepRule::new(Granularity::Daily, 2).apply(list);
        assert_eq!(kept(&outcome.candidates), vec![1, 2]);
        assert_eq!(outcome.satisfied, 2);
        assert!(!outcome.anchored);
    }

    #[test]
    fn test_newest_in_bucket_wins() {
        let list = candidates(&[at(2000, 1, 1, 3), at(2000, 1, 1, 9), at(2000, 1, 1, 1)]);

        let outcome = KeepRule::new(Granularity::Daily, 1).apply(list);
        assert_eq!(kept(&outcome.candidates), vec![1]);
    }

    #[test]
    fn test_equal_timestamps_first_wins() {
        let list = candidates(&[at(2000, 1, 1, 1), at(2000, 1, 1, 5), at(2000, 1, 1, 5)]);

        let outcome = KeepRule::new(Granularity::Daily, 1).apply(list);
        assert_eq!(kept(&outcome.candidates), vec![1]);
    }

    #[test]
    fn test_zero_count_keeps_nothing() {
        let list = candidates(&[at(2000, 1, 1, 0), at(2000, 2, 1, 0)]);

        let outcome = KeepRule::new(Granularity::Monthly, 0).apply(list);
        assert!(kept(&outcome.candidates).is_empty());
        assert_eq!(outcome.newly_kept(), 0);
    }

    #[test]
    fn test_already_kept_bucket_does_not_count() {
        // Monthly rule after the daily rule kept the newest of March
        let list = candidates(&[at(2000, 1, 10, 0), at(2000, 2, 10, 0), at(2000, 3, 10, 0)]);
        let after_daily = KeepRule::new(Granularity::Daily, 1).apply(list);
        assert_eq!(kept(&after_daily.candidates), vec![2]);

        let outcome = KeepRule::new(Granularity::Monthly, 1).apply(after_daily.candidates);
        assert_eq!(kept(&outcome.candidates), vec![1, 2]);
        assert_eq!(outcome.satisfied, 1);
    }

    #[test]
    fn test_anchor_keeps_oldest_when_quota_not_met() {
        let list = candidates(&[
            at(2000, 1, 2, 0),
            at(2000, 1, 1, 12),
            at(2000, 1, 1, 6),
            at(2000, 1, 3, 0),
        ]);

        // Three days, quota of five: all day-newest kept, plus the oldest
        let outcome = KeepRule::new(Granularity::Daily, 5).apply(list);
        assert_eq!(kept(&outcome.candidates), vec![0, 1, 2, 3]);
        assert_eq!(outcome.satisfied, 3);
        assert!(outcome.anchored);
        assert_eq!(outcome.newly_kept(), 4);
    }

    #[test]
    fn test_anchor_already_kept_changes_nothing() {
        let list = candidates(&[at(2000, 1, 1, 0), at(2000, 1, 2, 0)]);

        let outcome = KeepRule::new(Granularity::Daily, 3).apply(list);
        assert_eq!(kept(&outcome.candidates), vec![0, 1]);
        assert!(!outcome.anchored);
    }

    #[test]
    fn test_anchor_equal_timestamps_first_wins() {
        let list = candidates(&[
            at(2001, 1, 1, 0),
            at(2000, 1, 1, 0),
            at(2000, 1, 1, 0),
        ]);
        let after_daily = KeepRule::new(Granularity::Daily, 1).apply(list);
        assert_eq!(kept(&after_daily.candidates), vec![0]);

        // 2001 is already kept, 2000's newest is index 1, and the anchor
        // falls on index 1 again
        let outcome = KeepRule::new(Granularity::Yearly, 3).apply(after_daily.candidates);
        assert_eq!(kept(&outcome.candidates), vec![0, 1]);
        assert_eq!(outcome.satisfied, 1);
        assert!(!outcome.anchored);
    }

    #[test]
    fn test_empty_candidates() {
        let outcome = KeepRule::new(Granularity::Yearly, 2).apply(Vec::new());
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.newly_kept(), 0);
    }
}
