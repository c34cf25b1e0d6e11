//! Retention engine

use serde::Serialize;
use snapkeep_config::RetentionPolicy;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{Candidate, Granularity, KeepRule, TimestampedEntry};

/// Outcome of a retention calculation
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetentionResult {
    /// Every candidate by path
    #[serde(skip)]
    pub by_path: BTreeMap<PathBuf, Candidate>,
    /// Kept candidates, in input order
    pub kept: Vec<Candidate>,
    /// Prunable candidates, in input order
    pub pruned: Vec<Candidate>,
}

impl RetentionResult {
    fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let by_path = candidates
            .iter()
            .map(|c| (c.path().to_path_buf(), c.clone()))
            .collect();

        let (kept, pruned) = candidates.into_iter().partition(Candidate::is_kept);

        Self {
            by_path,
            kept,
            pruned,
        }
    }

    /// Look up a candidate by path
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Candidate> {
        self.by_path.get(path.as_ref())
    }

    /// Total number of candidates
    pub fn len(&self) -> usize {
        self.kept.len() + self.pruned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The retention engine: runs the rule cascade of a policy over a set of
/// entries and classifies each one as kept or pruned
#[derive(Debug, Clone)]
pub struct RetentionEngine {
    policy: RetentionPolicy,
}

impl RetentionEngine {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Rules this policy runs, in cascade order. Empty when the policy is
    /// inactive.
    pub fn rules(&self) -> Vec<KeepRule> {
        if !self.policy.is_active() {
            return Vec::new();
        }

        Granularity::CASCADE
            .iter()
            .filter_map(|g| g.keep_count(&self.policy).map(|count| KeepRule::new(*g, count)))
            .collect()
    }

    /// Classify `entries`
    pub fn calculate(&self, entries: impl IntoIterator<Item = TimestampedEntry>) -> RetentionResult {
        let candidates: Vec<Candidate> = entries.into_iter().map(Candidate::new).collect();

        if candidates.is_empty() {
            debug!("No candidates, nothing to calculate");
            return RetentionResult::default();
        }

        let candidates = if self.policy.is_active() {
            self.run_cascade(candidates)
        } else {
            info!(
                policy = %self.policy,
                "Retention policy inactive, keeping everything"
            );
            candidates
                .into_iter()
                .map(|mut c| {
                    c.mark_kept();
                    c
                })
                .collect()
        };

        let result = RetentionResult::from_candidates(candidates);

        info!(
            total = result.len(),
            kept = result.kept.len(),
            pruned = result.pruned.len(),
            "Retention calculated"
        );

        result
    }

    fn run_cascade(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        self.rules().iter().fold(candidates, |candidates, rule| {
            let outcome = rule.apply(candidates);

            debug!(
                granularity = %rule.granularity,
                keep_count = rule.keep_count,
                satisfied = outcome.satisfied,
                newly_kept = outcome.newly_kept(),
                anchored = outcome.anchored,
                "Rule applied"
            );

            outcome.candidates
        })
    }
}
