//! playlog
//!
//! Command line tracker for a personal game collection: collections of
//! games with play time, status and rating, reports over them, and
//! JSON/SQLite export.

mod app;
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use playlog_config::PlaylogConfig;
use std::io;
use tracing::debug;

use app::App;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlaylogConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => PlaylogConfig::load_default().context("Failed to load configuration")?,
    };

    // Setup logging
    setup_logging(&config.logging.level);

    let mut storage = config.storage;
    if let Some(library) = cli.library {
        storage.library_path = library;
    }
    debug!("Using library {}", storage.library_path.display());

    let mut app = App::open(storage)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.run(cli.command, &mut out)
}

/// Setup logging to stderr, keeping stdout for command output
fn setup_logging(default_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}
