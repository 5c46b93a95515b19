//! Headless `lantern` runner: plays one boss encounter and prints a JSON report.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use lantern::{init_logging, BossConfig, Simulation};
use log::info;

/// Runs a boss encounter headless and prints a JSON summary
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Boss configuration file (JSON); the built-in boss is used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 60.0)]
    seconds: f32,

    /// Fixed step length in seconds
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    tick: f32,

    /// Seed for random attack selection
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(
        args.tick.is_finite() && args.tick > 0.0,
        "tick must be a positive number of seconds, got {}",
        args.tick
    );

    let config = args.config.as_deref().map_or_else(
        || Ok(BossConfig::default()),
        |path| BossConfig::from_path(path).with_context(|| format!("loading {}", path.display())),
    )?;
    info!(
        "running {:.1}s at {:.4}s per tick with seed {}",
        args.seconds, args.tick, args.seed
    );

    let mut simulation = Simulation::new(&config, args.seed).context("building the boss")?;
    let report = simulation
        .run(args.seconds, args.tick)
        .context("simulation aborted")?;

    let summary = serde_json::to_string_pretty(report)?;
    writeln!(io::stdout().lock(), "{summary}")?;
    Ok(())
}
