// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strava_club_tracker::config::Config;
use strava_club_tracker::models::ActivityRecord;
use tempfile::TempDir;
use wiremock::MockServer;

/// Club ID used by all fixtures.
#[allow(dead_code)]
pub const CLUB_ID: &str = "4242";

/// Feed path for [`CLUB_ID`] on the mock server.
#[allow(dead_code)]
pub const FEED_PATH: &str = "/api/v3/clubs/4242/activities";

#[allow(dead_code)]
pub const TOKEN_PATH: &str = "/oauth/token";

/// Scratch directory plus a config pointing at the mock server.
#[allow(dead_code)]
pub struct TestEnv {
    pub dir: TempDir,
    pub config: Config,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new(server: &MockServer) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            api_base_url: format!("{}/api/v3", server.uri()),
            token_url: format!("{}{}", server.uri(), TOKEN_PATH),
            http_timeout: Duration::from_secs(2),
            credentials_path: dir.path().join("credentials.txt"),
            error_log_dir: dir.path().join("ErrorLogs"),
        };
        Self { dir, config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Output name (without extension) inside the scratch directory.
    pub fn output_name(&self, base: &str) -> String {
        self.path(base).to_string_lossy().into_owned()
    }

    pub fn write_credentials(&self, expires_at: Option<i64>) {
        std::fs::write(&self.config.credentials_path, credentials_text(expires_at))
            .expect("write credentials");
    }

    pub fn read_credentials(&self) -> String {
        std::fs::read_to_string(&self.config.credentials_path).expect("read credentials")
    }

    /// Contents of every error log file written so far.
    pub fn error_log_contents(&self) -> String {
        read_dir_contents(&self.config.error_log_dir)
    }
}

#[allow(dead_code)]
pub fn credentials_text(expires_at: Option<i64>) -> String {
    let mut text = format!(
        "client_id=1001\nclient_secret=secret\naccess_token=old-access\nrefresh_token=old-refresh\nclub_id={}\n",
        CLUB_ID
    );
    if let Some(expires_at) = expires_at {
        text.push_str(&format!("expires_at={}\nexpires_in=21600\n", expires_at));
    }
    text
}

/// An expiry comfortably in the future.
#[allow(dead_code)]
pub fn future_expiry() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

/// A club feed entry as Strava returns it.
#[allow(dead_code)]
pub fn feed_entry(first: &str, last: &str, name: &str, distance: f64) -> Value {
    json!({
        "resource_state": 2,
        "athlete": {"resource_state": 2, "firstname": first, "lastname": last},
        "name": name,
        "distance": distance,
        "moving_time": 3600,
        "elapsed_time": 4000,
        "total_elevation_gain": 321.0,
        "type": "Ride",
        "sport_type": "Ride",
        "workout_type": null
    })
}

/// Token endpoint success body.
#[allow(dead_code)]
pub fn token_body(access: &str, refresh: &str, expires_at: i64) -> Value {
    json!({
        "token_type": "Bearer",
        "access_token": access,
        "refresh_token": refresh,
        "expires_at": expires_at,
        "expires_in": 21600
    })
}

/// Dataset row matching [`feed_entry`].
#[allow(dead_code)]
pub fn record(first: &str, last: &str, title: &str, distance: f64) -> ActivityRecord {
    ActivityRecord {
        date: String::new(),
        firstname: first.to_string(),
        lastname: last.to_string(),
        title: title.to_string(),
        distance: Some(distance),
        moving_time: Some(3600),
        elapsed_time: Some(4000),
        total_elevation_gain: Some(321.0),
        activity_type: "Ride".to_string(),
        sport_type: "Ride".to_string(),
        workout_type: String::new(),
    }
}

#[allow(dead_code)]
pub fn read_dir_contents(dir: &Path) -> String {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return String::new();
    };
    entries
        .filter_map(|e| e.ok())
        .filter_map(|e| std::fs::read_to_string(e.path()).ok())
        .collect()
}
