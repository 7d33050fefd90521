use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use perch_common::observability::{init_logging, LogConfig};
use perch_config::{PerchConfig, PerchConfigLoader};
use perch_fetch::PageFetcher;

mod notify;
mod pipeline;

/// Scrape one profile page and deliver a digest of its recent posts.
#[derive(Parser)]
#[command(name = "perch", version)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "perch.yaml", env = "PERCH_CONFIG")]
    config: PathBuf,
    /// Print the digest to stdout instead of the configured notifier.
    #[arg(long)]
    print: bool,
    /// Mirror log events to stderr in addition to the log file.
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load and validate config (env wins over the file).
    let cfg: PerchConfig = PerchConfigLoader::new()
        .with_file(&cli.config)
        .load()
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    cfg.validate().context("invalid configuration")?;

    init_logging(LogConfig {
        emit_stderr: cli.verbose,
        ..LogConfig::default()
    })?;

    let fetcher = PageFetcher::new()?;
    let notifier = if cli.print {
        Box::new(notify::StdoutNotifier) as Box<dyn notify::Notifier + Send + Sync>
    } else {
        notify::from_config(&cfg.notifier)
    };

    pipeline::run(&cfg, &fetcher, notifier.as_ref()).await
}
