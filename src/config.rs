//! Application configuration loaded from environment variables.
//!
//! Only endpoints and local paths live here. Strava credentials come from the
//! credentials file (see [`crate::db::credentials`]).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Activities returned per club feed page. Fixed by Strava.
pub const PER_PAGE: u32 = 30;

/// Upper bound on pages fetched in one run (Strava's per-minute request budget).
pub const MAX_PAGES: u32 = 50;

const DEFAULT_API_BASE_URL: &str = "https://www.strava.com/api/v3";
const DEFAULT_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;
const DEFAULT_CREDENTIALS_PATH: &str = "credentials.txt";
const DEFAULT_ERROR_LOG_DIR: &str = "ErrorLogs";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Strava REST API
    pub api_base_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,
    /// key=value credentials file, read at start and rewritten at exit
    pub credentials_path: PathBuf,
    /// Directory holding the date-stamped error logs
    pub error_log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            error_log_dir: PathBuf::from(DEFAULT_ERROR_LOG_DIR),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let http_timeout = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(v) => {
                let secs: u64 = v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECS", v.clone()))?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url: env::var("STRAVA_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            token_url: env::var("STRAVA_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            http_timeout,
            credentials_path: env::var("CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH)),
            error_log_dir: env::var("ERROR_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ERROR_LOG_DIR)),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
