// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Club activity record and the persisted dataset.

use serde::{Deserialize, Serialize};

/// Column order of the persisted dataset.
pub const COLUMNS: [&str; 11] = [
    "date",
    "firstname",
    "lastname",
    "title",
    "distance",
    "moving_time",
    "elapsed_time",
    "total_elevation_gain",
    "type",
    "sport_type",
    "workout_type",
];

/// One row of the club dataset.
///
/// Field declaration order is the column order; keep it in sync with [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Always empty: the club feed does not expose dates
    #[serde(default)]
    pub date: String,
    /// Athlete first name
    #[serde(default)]
    pub firstname: String,
    /// Athlete last name (Strava only exposes the initial in club feeds)
    #[serde(default)]
    pub lastname: String,
    /// Activity name/title
    #[serde(default)]
    pub title: String,
    /// Distance in meters
    #[serde(default)]
    pub distance: Option<f64>,
    /// Moving time in seconds
    #[serde(default, deserialize_with = "de_opt_seconds")]
    pub moving_time: Option<u64>,
    /// Elapsed time in seconds
    #[serde(default, deserialize_with = "de_opt_seconds")]
    pub elapsed_time: Option<u64>,
    /// Total elevation gain in meters
    #[serde(default)]
    pub total_elevation_gain: Option<f64>,
    /// Legacy activity type (Ride, Run, ...)
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Sport type (Ride, GravelRide, ...)
    #[serde(default)]
    pub sport_type: String,
    /// Always empty: not supplied by the club feed
    #[serde(default)]
    pub workout_type: String,
}

/// Seconds, also accepting `1200.0` as written by tools that store integer
/// columns as floats. Fractional values are rounded to the nearest second.
fn de_opt_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(Some(v.round() as u64)),
        Some(v) => Err(serde::de::Error::custom(format!(
            "expected a non-negative number of seconds, got {}",
            v
        ))),
    }
}

impl ActivityRecord {
    /// Composite key used for deduplication.
    pub fn key(&self) -> ActivityKey {
        ActivityKey {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            title: self.title.clone(),
            distance_bits: self.distance.map(f64::to_bits),
        }
    }
}

/// (firstname, lastname, title, distance).
///
/// Strava club feeds carry no activity ID, so this tuple stands in for one.
/// Distance is compared bit-for-bit so the key can be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityKey {
    firstname: String,
    lastname: String,
    title: String,
    distance_bits: Option<u64>,
}

/// Ordered, append-only collection of activity records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<ActivityRecord>,
}

impl Dataset {
    /// An empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityRecord> {
        self.records.iter()
    }

    /// Append a record at the end.
    pub fn push(&mut self, record: ActivityRecord) {
        self.records.push(record);
    }

    pub fn into_records(self) -> Vec<ActivityRecord> {
        self.records
    }
}

impl From<Vec<ActivityRecord>> for Dataset {
    fn from(records: Vec<ActivityRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<ActivityRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ActivityRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ActivityRecord;
    type IntoIter = std::slice::Iter<'a, ActivityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
