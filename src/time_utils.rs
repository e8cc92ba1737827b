// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, TimeZone};

/// Format a timestamp the way C `ctime` does, e.g. `Thu Oct 15 09:41:07 2026`.
pub fn format_ctime<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// File name of the error log for a given day, e.g. `2026-10-15.txt`.
pub fn daily_log_file_name(day: NaiveDate) -> String {
    format!("{}.txt", day.format("%Y-%m-%d"))
}

/// Convert a Unix timestamp into a UTC datetime, if it is in range.
pub fn from_unix(secs: i64) -> Option<DateTime<chrono::Utc>> {
    DateTime::from_timestamp(secs, 0)
}
