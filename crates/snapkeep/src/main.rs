//! snapkeep - prune timestamped backups
//!
//! Wires together:
//! - Configuration loading and command line overrides
//! - Backup discovery under the root directory
//! - The retention engine
//! - Reporting what to keep and what to prune

mod output;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use output::{OutputMode, write_result};
use snapkeep_config::{Activation, Policy, load_config};
use snapkeep_core::RetentionEngine;
use snapkeep_scan::{EntrySource, FileSystemTraverser};
use snapkeep_util::{SNAPKEEP_CONFIG_ENV, config_path_without_env, validate_pattern};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// snapkeep - Decide which timestamped backups to keep
#[derive(Parser, Debug)]
#[command(name = "snapkeep", version)]
#[command(about = "Prune timestamped backups with daily, monthly and yearly keep rules", long_about = None)]
struct Args {
    /// Number of daily backups to keep
    #[arg(short = 'd', long)]
    keep_daily: Option<u32>,

    /// Number of monthly backups to keep
    #[arg(short = 'm', long)]
    keep_monthly: Option<u32>,

    /// Number of yearly backups to keep
    #[arg(short = 'y', long)]
    keep_yearly: Option<u32>,

    /// Timestamp pattern of the backup directory names (chrono strftime syntax)
    #[arg(short, long)]
    pattern: Option<String>,

    /// Configuration file (default: ~/.config/snapkeep/config.toml)
    #[arg(short, long, env = SNAPKEEP_CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Prune only when daily, monthly and yearly counts are all set
    #[arg(long)]
    require_all: bool,

    /// Print keep/prune for every backup and the totals
    #[arg(short, long)]
    verbose: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "verbose")]
    json: bool,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Directory containing the backups
    path: Option<PathBuf>,
}

impl Args {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::PruneList
        }
    }
}

/// An explicit config file has to exist; the default one may be missing.
fn load_policy(args: &Args) -> Result<Policy> {
    if let Some(path) = &args.config {
        let policy = load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?;
        info!(config_path = %path.display(), "Configuration loaded");
        return Ok(policy);
    }

    let path = config_path_without_env();
    if !path.exists() {
        debug!(config_path = %path.display(), "No configuration file, using defaults");
        return Ok(Policy::default());
    }

    let policy =
        load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))?;
    info!(config_path = %path.display(), "Configuration loaded");
    Ok(policy)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout carries the result
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let policy = load_policy(&args)?;

    let mut retention =
        policy
            .retention
            .with_overrides(args.keep_daily, args.keep_monthly, args.keep_yearly);
    if args.require_all {
        retention = retention.with_activation(Activation::RequireAll);
    }

    let pattern = args.pattern.clone().unwrap_or(policy.source.pattern);
    validate_pattern(&pattern).context("Invalid timestamp pattern")?;

    let Some(root) = args.path.clone().or(policy.source.path) else {
        Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "no backup directory given on the command line or in the config file",
            )
            .exit();
    };

    info!(
        root = %root.display(),
        pattern = %pattern,
        retention = %retention,
        "snapkeep starting"
    );

    let traverser = FileSystemTraverser::new(&root, pattern);
    let entries = traverser
        .entries()
        .with_context(|| format!("Failed to list backups in {:?}", root))?;

    let result = RetentionEngine::new(retention).calculate(entries);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    write_result(
        &result,
        args.output_mode(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
    .context("Failed to write result")?;

    Ok(())
}
