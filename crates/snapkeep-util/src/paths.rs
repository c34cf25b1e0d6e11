//! Default paths for snapkeep components
//!
//! Paths are user-writable by default (no root required):
//! - Config: `$XDG_CONFIG_HOME/snapkeep/config.toml` or `~/.config/snapkeep/config.toml`

use std::path::PathBuf;

/// Environment variable for overriding the config file path
pub const SNAPKEEP_CONFIG_ENV: &str = "SNAPKEEP_CONFIG";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Application subdirectory name
const APP_DIR: &str = "snapkeep";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$SNAPKEEP_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/snapkeep/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/snapkeep/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(SNAPKEEP_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_path_without_env()
}

/// Get the config path without checking SNAPKEEP_CONFIG env var.
/// Used for clap defaults where the env var is checked separately.
pub fn config_path_without_env() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    // Last resort
    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}
