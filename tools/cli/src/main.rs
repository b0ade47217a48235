//! CredSync CLI - reconciles saved credentials between two browser profiles.
//!
//! Takes the paths of two profile credential databases and rewrites both to
//! the union of their valid records, with the primary store winning on
//! conflict. Neither file is altered unless the whole sync succeeds.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use credsync_engine::sync_stores;

#[derive(Parser)]
#[command(name = "credsync")]
#[command(about = "CredSync - merge saved credentials between two profile stores")]
#[command(version)]
struct Cli {
    /// Primary store file; its records win on conflict.
    primary: PathBuf,

    /// Secondary store file.
    secondary: PathBuf,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Usage errors must exit 1, not clap's default 2. Help and version
    // requests still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    for path in [&cli.primary, &cli.secondary] {
        if !path.exists() {
            anyhow::bail!("Store not found: {}", path.display());
        }
    }

    info!(
        "Syncing {} (primary) with {}",
        cli.primary.display(),
        cli.secondary.display()
    );

    let outcome = sync_stores(&cli.primary, &cli.secondary).context("Failed to sync stores")?;

    if outcome.invalid_primary > 0 || outcome.invalid_secondary > 0 {
        println!(
            "  Deleted {} invalid records from primary store, {} from secondary",
            outcome.invalid_primary, outcome.invalid_secondary
        );
    }
    println!("  Synced {} records (primary priority)", outcome.synced);

    Ok(())
}
