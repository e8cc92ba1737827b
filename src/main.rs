// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava Club Tracker
//!
//! Fetches a Strava club's public activity feed into a deduplicated CSV
//! dataset and prints descriptive statistics over it.

use clap::Parser;
use strava_club_tracker::{app, cli::Cli, error_log::ErrorLog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, cli.json_logs);

    let config = app::load_config()?;
    let error_log = ErrorLog::new(&config.error_log_dir);

    app::run(cli.cmd, &config, &error_log).await
}

/// Initialize logging. RUST_LOG overrides the verbosity flags.
fn init_logging(verbose: u8, quiet: u8, json: bool) {
    let level = match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strava_club_tracker={level},warn")));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
