//! Mapping of raw club feed entries onto dataset rows.

use crate::models::ActivityRecord;
use crate::services::strava::ClubActivity;

/// Convert one club feed entry into a dataset row.
///
/// Missing fields become empty text or absent numbers. `date` and
/// `workout_type` are never supplied by the club feed and are always empty.
pub fn normalize(raw: ClubActivity) -> ActivityRecord {
    let athlete = raw.athlete.unwrap_or_default();

    ActivityRecord {
        date: String::new(),
        firstname: athlete.firstname.unwrap_or_default(),
        lastname: athlete.lastname.unwrap_or_default(),
        title: raw.name.unwrap_or_default(),
        distance: raw.distance,
        moving_time: raw.moving_time,
        elapsed_time: raw.elapsed_time,
        total_elevation_gain: raw.total_elevation_gain,
        activity_type: raw.activity_type.unwrap_or_default(),
        sport_type: raw.sport_type.unwrap_or_default(),
        workout_type: String::new(),
    }
}

/// Normalize a batch, preserving order.
pub fn normalize_all(raw: impl IntoIterator<Item = ClubActivity>) -> Vec<ActivityRecord> {
    raw.into_iter().map(normalize).collect()
}
