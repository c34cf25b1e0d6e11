//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Where backups live and how their names are stamped
    #[serde(default)]
    pub source: RawSourceConfig,

    /// Retention counts
    #[serde(default)]
    pub retention: RawRetention,
}

/// Backup source settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSourceConfig {
    /// Directory holding one timestamped subdirectory per backup
    pub path: Option<PathBuf>,

    /// strftime pattern matching the subdirectory names
    pub pattern: Option<String>,
}

/// Retention counts. A missing key leaves that granularity unset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRetention {
    pub keep_daily: Option<u32>,
    pub keep_monthly: Option<u32>,
    pub keep_yearly: Option<u32>,

    /// "per_granularity" (default) or "require_all"
    pub activation: Option<String>,
}
