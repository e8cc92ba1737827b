// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run entry point shared by the binary and integration tests.

use crate::cli::Cmd;
use crate::config::{Config, ConfigError};
use crate::db::{csv_path, CredentialsFile, DatasetStore};
use crate::error::AppError;
use crate::error_log::ErrorLog;
use crate::models::Dataset;
use crate::services::analysis::{
    average_speed_by_rider, cluster_rides, most_published_riders, ride_features,
};
use crate::services::{ActivitySync, FetchMode, PageCount, StravaClient, SyncReport};
use anyhow::Context;
use std::fmt::{self, Write};

/// Options for a fetch run.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub filename: String,
    pub mode: FetchMode,
    pub pages: PageCount,
    pub mirror_json: bool,
}

/// Execute one command. Failures are appended to `error_log` before being
/// returned.
pub async fn run(cmd: Cmd, config: &Config, error_log: &ErrorLog) -> anyhow::Result<()> {
    let result = execute(cmd, config).await;

    if let Err(e) = &result {
        record_failure(error_log, e);
    }
    result
}

/// Log a failed run and append it to the error log.
pub fn record_failure(error_log: &ErrorLog, error: &anyhow::Error) {
    let message = format!("{:#}", error);
    let kind = error.downcast_ref::<AppError>().map_or("setup", AppError::kind);
    tracing::error!(kind, error = %message, "Run failed");

    match error_log.record(&message) {
        Ok(path) => tracing::debug!(path = %path.display(), "Failure recorded"),
        Err(log_err) => tracing::warn!(error = %log_err, "Could not write error log"),
    }
}

async fn execute(cmd: Cmd, config: &Config) -> anyhow::Result<()> {
    match cmd {
        Cmd::Fetch {
            filename,
            pages,
            repeat,
            no_json,
        } => {
            // Reject bad input before touching any file or the network.
            let options = FetchOptions {
                filename,
                mode: if repeat {
                    FetchMode::Repeat
                } else {
                    FetchMode::Incremental
                },
                pages: PageCount::new(pages)?,
                mirror_json: !no_json,
            };

            let report = fetch(config, &options).await?;
            println!(
                "All club data from Strava has been saved: {} fetched, {} added, {} skipped, {} total",
                report.fetched, report.added, report.skipped, report.total
            );
            Ok(())
        }
        Cmd::Analyze { filename, clusters } => {
            let store = DatasetStore::new(csv_path(&filename));
            let dataset = store.load();
            if dataset.is_empty() {
                anyhow::bail!("No rides found in {}", store.path().display());
            }
            print!("{}", analysis_report(&dataset, clusters)?);
            Ok(())
        }
    }
}

/// Load credentials, sync the club feed, and write the credentials back.
///
/// The credentials file is rewritten even when the sync fails so that a
/// refreshed token pair is never lost.
pub async fn fetch(config: &Config, options: &FetchOptions) -> Result<SyncReport, AppError> {
    let credentials_file = CredentialsFile::new(&config.credentials_path);
    let mut credentials = credentials_file.load()?;

    let client = StravaClient::new(config)?;
    let store =
        DatasetStore::new(csv_path(&options.filename)).with_json_mirror(options.mirror_json);

    let result = ActivitySync::new(&client, &store)
        .run(&mut credentials, options.mode, options.pages)
        .await;

    if let Err(e) = credentials_file.save(&credentials) {
        if result.is_ok() {
            return Err(e);
        }
        tracing::warn!(error = %e, "Failed to save credentials after failed run");
    }
    result
}

/// Text report over a loaded dataset.
pub fn analysis_report(dataset: &Dataset, clusters: usize) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, dataset, clusters)?;
    Ok(out)
}

fn write_report(out: &mut impl Write, dataset: &Dataset, clusters: usize) -> fmt::Result {
    writeln!(out, "Rider with the most published rides:")?;
    for count in most_published_riders(dataset) {
        writeln!(out, "  {:<30} {:>6}", count.rider.to_string(), count.rides)?;
    }

    writeln!(out, "\nAverage speed per ride:")?;
    writeln!(out, "  {:<30} {:>10} {:>10}", "rider", "m/s", "km/h")?;
    for speed in average_speed_by_rider(dataset) {
        writeln!(
            out,
            "  {:<30} {:>10.3} {:>10.3}",
            speed.rider.to_string(),
            speed.speed_ms,
            speed.speed_kmh
        )?;
    }

    let report = cluster_rides(&ride_features(dataset), clusters);
    writeln!(out, "\nRide clusters (k={}):", report.clusters.len())?;
    writeln!(
        out,
        "  {:>7} {:>6} {:>12} {:>10} {:>14}",
        "cluster", "rides", "distance_km", "speed_kmh", "elevation_m"
    )?;
    for cluster in &report.clusters {
        writeln!(
            out,
            "  {:>7} {:>6} {:>12.2} {:>10.2} {:>14.2}",
            cluster.cluster,
            cluster.rides,
            cluster.mean.distance_km,
            cluster.mean.speed_kmh,
            cluster.mean.elevation_gain_m
        )?;
    }
    Ok(())
}

/// Load configuration from the environment.
///
/// The configured error log directory is unknown when this fails, so the
/// failure goes to the default one.
pub fn load_config() -> anyhow::Result<Config> {
    let fallback_log = ErrorLog::new(Config::default().error_log_dir);
    load_config_from(Config::from_env, &fallback_log)
}

fn load_config_from(
    load: impl FnOnce() -> Result<Config, ConfigError>,
    error_log: &ErrorLog,
) -> anyhow::Result<Config> {
    let result = load().context("Failed to load configuration");
    if let Err(e) = &result {
        record_failure(error_log, e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityRecord;
    use std::fs;

    fn ride(first: &str, title: &str, distance: f64, moving_time: u64) -> ActivityRecord {
        ActivityRecord {
            date: String::new(),
            firstname: first.to_string(),
            lastname: "X.".to_string(),
            title: title.to_string(),
            distance: Some(distance),
            moving_time: Some(moving_time),
            elapsed_time: Some(moving_time),
            total_elevation_gain: Some(100.0),
            activity_type: "Ride".to_string(),
            sport_type: "Ride".to_string(),
            workout_type: String::new(),
        }
    }

    #[test]
    fn test_config_failure_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let error_log = ErrorLog::new(dir.path().join("ErrorLogs"));

        let result = load_config_from(
            || Err(ConfigError::Invalid("HTTP_TIMEOUT_SECS", "soon".to_string())),
            &error_log,
        );

        assert!(result.is_err());
        let logged: String = fs::read_dir(dir.path().join("ErrorLogs"))
            .unwrap()
            .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(logged.contains("Failed to load configuration"));
        assert!(logged.contains("HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_config_success_writes_no_log() {
        let dir = tempfile::tempdir().unwrap();
        let error_log = ErrorLog::new(dir.path().join("ErrorLogs"));

        let config = load_config_from(|| Ok(Config::default()), &error_log).unwrap();

        assert_eq!(config.error_log_dir, Config::default().error_log_dir);
        assert!(!dir.path().join("ErrorLogs").exists());
    }

    #[test]
    fn test_analysis_report_sections() {
        let dataset = Dataset::from(vec![
            ride("Ann", "1", 10_000.0, 2000),
            ride("Ann", "2", 12_000.0, 2000),
            ride("Bob", "3", 50_000.0, 7200),
        ]);

        let report = analysis_report(&dataset, 2).unwrap();

        assert!(report.starts_with("Rider with the most published rides:\n"));
        assert!(report.contains("Ann X."));
        assert!(report.contains("Average speed per ride:"));
        assert!(report.contains("Ride clusters (k=2):"));
    }
}
