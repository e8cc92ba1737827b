// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date-stamped, append-only log of failed runs.
//!
//! One file per local calendar day under the configured directory. Each
//! failure is a single line: `<ctime timestamp>: <message>`.

use crate::time_utils::{daily_log_file_name, format_ctime};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Sink for unrecoverable run failures.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    dir: PathBuf,
}

impl ErrorLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Log file used for entries written at `now`.
    pub fn path_at(&self, now: &DateTime<Local>) -> PathBuf {
        self.dir.join(daily_log_file_name(now.date_naive()))
    }

    /// Append a failure message stamped with the current local time.
    pub fn record(&self, message: &str) -> io::Result<PathBuf> {
        self.record_at(Local::now(), message)
    }

    /// Append a failure message with an explicit timestamp.
    pub fn record_at(&self, now: DateTime<Local>, message: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_at(&now);

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}: {}", format_ctime(&now), message.trim_end())?;
        file.flush()?;

        Ok(path)
    }
}
