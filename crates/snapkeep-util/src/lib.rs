//! Shared utilities for snapkeep
//!
//! This crate provides:
//! - Error types
//! - Timestamp pattern helpers (parse, format, validate)
//! - Default paths for the config file

mod error;
mod paths;
mod time;

pub use error::*;
pub use paths::*;
pub use time::*;
