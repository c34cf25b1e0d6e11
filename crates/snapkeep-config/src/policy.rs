//! Validated policy structures

use crate::schema::{RawConfig, RawRetention, RawSourceConfig};
use crate::validation::parse_activation;
use snapkeep_util::DEFAULT_PATTERN;
use std::fmt;
use std::path::PathBuf;

/// Validated policy ready for use by the retention engine
#[derive(Debug, Clone, Default)]
pub struct Policy {
    /// Backup source
    pub source: SourceConfig,

    /// Retention counts
    pub retention: RetentionPolicy,
}

impl Policy {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            source: SourceConfig::from_raw(raw.source),
            retention: RetentionPolicy::from_raw(raw.retention),
        }
    }
}

/// Where backups are found
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Root directory. None when the caller has to supply it.
    pub path: Option<PathBuf>,
    pub pattern: String,
}

impl SourceConfig {
    fn from_raw(raw: RawSourceConfig) -> Self {
        Self {
            path: raw.path,
            pattern: raw.pattern.unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// How unset retention counts gate the rule cascade.
///
/// `RequireAll` is the strict all-or-nothing check: no pruning unless daily,
/// monthly and yearly are all set. `PerGranularity` is the default so that a
/// policy such as "keep 7 daily" prunes on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Activation {
    /// Unset granularities are skipped; the configured ones run.
    /// With nothing configured, everything is kept.
    #[default]
    PerGranularity,
    /// Rules run only when every granularity is configured,
    /// otherwise everything is kept.
    RequireAll,
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::PerGranularity => write!(f, "per_granularity"),
            Activation::RequireAll => write!(f, "require_all"),
        }
    }
}

/// Per-granularity retention counts. `None` means the granularity is not
/// part of the policy; `Some(0)` keeps nothing at that granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub keep_daily: Option<u32>,
    pub keep_monthly: Option<u32>,
    pub keep_yearly: Option<u32>,
    pub activation: Activation,
}

impl RetentionPolicy {
    pub fn new(
        keep_daily: Option<u32>,
        keep_monthly: Option<u32>,
        keep_yearly: Option<u32>,
    ) -> Self {
        Self {
            keep_daily,
            keep_monthly,
            keep_yearly,
            activation: Activation::default(),
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Replace counts with the given ones where they are set
    pub fn with_overrides(
        mut self,
        keep_daily: Option<u32>,
        keep_monthly: Option<u32>,
        keep_yearly: Option<u32>,
    ) -> Self {
        self.keep_daily = keep_daily.or(self.keep_daily);
        self.keep_monthly = keep_monthly.or(self.keep_monthly);
        self.keep_yearly = keep_yearly.or(self.keep_yearly);
        self
    }

    /// All three granularities are set
    pub fn is_fully_configured(&self) -> bool {
        self.keep_daily.is_some() && self.keep_monthly.is_some() && self.keep_yearly.is_some()
    }

    /// No granularity is set
    pub fn is_unset(&self) -> bool {
        self.keep_daily.is_none() && self.keep_monthly.is_none() && self.keep_yearly.is_none()
    }

    /// Whether any pruning rule runs under this policy
    pub fn is_active(&self) -> bool {
        match self.activation {
            Activation::PerGranularity => !self.is_unset(),
            Activation::RequireAll => self.is_fully_configured(),
        }
    }

    fn from_raw(raw: RawRetention) -> Self {
        // Unknown names were rejected by validation
        let activation = raw
            .activation
            .as_deref()
            .and_then(|a| parse_activation(a).ok())
            .unwrap_or_default();

        Self {
            keep_daily: raw.keep_daily,
            keep_monthly: raw.keep_monthly,
            keep_yearly: raw.keep_yearly,
            activation,
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn count(c: Option<u32>) -> String {
            c.map(|c| c.to_string()).unwrap_or_else(|| "unset".into())
        }

        write!(
            f,
            "keep-daily: {}, keep-monthly: {}, keep-yearly: {} ({})",
            count(self.keep_daily),
            count(self.keep_monthly),
            count(self.keep_yearly),
            self.activation
        )
    }
}
