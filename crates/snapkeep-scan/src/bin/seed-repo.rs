//! seed-repo - create a test repository of timestamped backup directories
//!
//! Simulates a backup job: one directory per date, named with a timestamp
//! pattern, so that snapkeep has something realistic to prune.

use anyhow::{Context, Result};
use clap::Parser;
use snapkeep_scan::{DEFAULT_SEED_PATTERN, parse_date_ranges, seed_repository};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Create timestamp-named directories for a set of dates
#[derive(Parser, Debug)]
#[command(name = "seed-repo")]
#[command(about = "Create timestamp-named backup directories for testing", long_about = None)]
struct Args {
    /// Pattern used to name the directories (chrono strftime syntax)
    #[arg(short, long, default_value = DEFAULT_SEED_PATTERN)]
    pattern: String,

    /// Days between two backups
    #[arg(short, long, default_value_t = 1)]
    step_days: u32,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Repository root, created if missing
    root: PathBuf,

    /// Dates or ranges, e.g. 2000-01-01 or 2000-01-01...2000-12-31
    #[arg(required = true)]
    ranges: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let ranges = parse_date_ranges(&args.ranges)?;
    let names = seed_repository(&args.root, &args.pattern, &ranges, args.step_days)
        .with_context(|| format!("Failed to seed repository at {:?}", args.root))?;

    for name in &names {
        println!("{}", name);
    }

    info!(root = %args.root.display(), count = names.len(), "Repository seeded");
    Ok(())
}
