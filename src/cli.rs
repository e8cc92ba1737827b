// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command-line interface.

use crate::services::analysis::DEFAULT_CLUSTERS;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "strava-club-tracker",
    about = "Fetch a Strava club's public activities into a CSV dataset and summarize them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Fetch club activities from Strava and save them
    Fetch {
        /// Output file; `.csv` is appended unless already present
        #[arg(value_name = "FILENAME")]
        filename: String,

        /// Maximum number of pages (inclusive) to fetch, 1 to 50 (Strava allows 50 requests per minute)
        #[arg(value_name = "PAGES", default_value_t = 1, allow_negative_numbers = true)]
        pages: i64,

        /// Overwrite the file with exactly PAGES pages instead of merging into it
        #[arg(short = 'r', long)]
        repeat: bool,

        /// Do not write the JSON mirror next to the CSV file
        #[arg(long)]
        no_json: bool,
    },

    /// Print ride statistics and clusters for a saved dataset
    Analyze {
        /// Dataset file; `.csv` is appended unless already present
        #[arg(value_name = "FILENAME")]
        filename: String,

        /// Number of ride clusters
        #[arg(short = 'k', long, default_value_t = DEFAULT_CLUSTERS)]
        clusters: usize,
    },
}
