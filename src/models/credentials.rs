//! Strava API credentials for a single club.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

const REQUIRED_KEYS: [&str; 4] = ["client_id", "client_secret", "refresh_token", "club_id"];

/// OAuth client credentials and the current token pair.
///
/// Loaded once per run, mutated in place by a token refresh, and written
/// back through [`Credentials::to_key_values`].
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp at which `access_token` expires
    pub expires_at: Option<i64>,
    /// Lifetime in seconds reported with the last refresh
    pub expires_in: Option<i64>,
    pub club_id: String,
}

/// New token set returned by the token endpoint.
///
/// All four fields are required; a response missing any of them is rejected
/// before the credentials are touched.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub expires_in: i64,
}

impl Credentials {
    /// Parse a `key=value` text record.
    ///
    /// Lines without `=` are ignored; keys and values are trimmed and split on
    /// the first `=`.
    pub fn from_key_values(text: &str) -> Result<Self, AppError> {
        let values: HashMap<&str, &str> = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.trim(), v.trim()))
            .collect();

        if values.is_empty() {
            return Err(AppError::Configuration(
                "credentials source contains no key=value entries".to_string(),
            ));
        }

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|k| values.get(k).map_or(true, |v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Configuration(format!(
                "credentials missing required keys: {}",
                missing.join(", ")
            )));
        }

        let text_value = |key: &str| values.get(key).copied().unwrap_or_default().to_string();

        Ok(Self {
            client_id: text_value("client_id"),
            client_secret: text_value("client_secret"),
            access_token: text_value("access_token"),
            refresh_token: text_value("refresh_token"),
            expires_at: parse_optional_int(&values, "expires_at")?,
            expires_in: parse_optional_int(&values, "expires_in")?,
            club_id: text_value("club_id"),
        })
    }

    /// Serialize to the `key=value` text record, one entry per line.
    pub fn to_key_values(&self) -> String {
        let mut out = String::new();
        let mut line = |key: &str, value: &str| {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        };

        line("client_id", &self.client_id);
        line("client_secret", &self.client_secret);
        line("access_token", &self.access_token);
        line("refresh_token", &self.refresh_token);
        if let Some(expires_at) = self.expires_at {
            line("expires_at", &expires_at.to_string());
        }
        if let Some(expires_in) = self.expires_in {
            line("expires_in", &expires_in.to_string());
        }
        line("club_id", &self.club_id);
        out
    }

    /// True when there is no known expiry or it is not after `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now.timestamp(),
            None => true,
        }
    }

    /// Replace the token set wholesale.
    pub fn apply_refresh(&mut self, tokens: TokenRefreshResponse) {
        self.access_token = tokens.access_token;
        self.refresh_token = tokens.refresh_token;
        self.expires_at = Some(tokens.expires_at);
        self.expires_in = Some(tokens.expires_in);
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("expires_in", &self.expires_in)
            .field("club_id", &self.club_id)
            .finish()
    }
}

fn parse_optional_int(values: &HashMap<&str, &str>, key: &str) -> Result<Option<i64>, AppError> {
    match values.get(key) {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| {
            AppError::Configuration(format!("credentials key {} is not an integer: {:?}", key, v))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = "client_id = 12345\n\
                          client_secret=shh\n\
                          # comment without separator\n\
                          access_token=abc\n\
                          refresh_token=def=ghi\n\
                          club_id=777\n";

    #[test]
    fn test_parse_trims_and_splits_on_first_equals() {
        let creds = Credentials::from_key_values(SAMPLE).unwrap();
        assert_eq!(creds.client_id, "12345");
        assert_eq!(creds.refresh_token, "def=ghi");
        assert_eq!(creds.club_id, "777");
        assert_eq!(creds.expires_at, None);
    }

    #[test]
    fn test_parse_empty_is_configuration_error() {
        let err = Credentials::from_key_values("\n\n").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_parse_reports_missing_keys() {
        let err = Credentials::from_key_values("client_id=1\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("client_secret"));
        assert!(msg.contains("club_id"));
    }

    #[test]
    fn test_parse_rejects_non_integer_expiry() {
        let text = format!("{}expires_at=tomorrow\n", SAMPLE);
        assert!(matches!(
            Credentials::from_key_values(&text),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_key_values_round_trip() {
        let mut creds = Credentials::from_key_values(SAMPLE).unwrap();
        creds.expires_at = Some(1_800_000_000);
        creds.expires_in = Some(21600);

        let text = creds.to_key_values();
        assert!(text.starts_with("client_id=12345\nclient_secret=shh\n"));
        assert_eq!(Credentials::from_key_values(&text).unwrap(), creds);
    }

    #[test]
    fn test_expiry_check() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut creds = Credentials::from_key_values(SAMPLE).unwrap();
        assert!(creds.is_expired_at(now));

        creds.expires_at = Some(now.timestamp() + 60);
        assert!(!creds.is_expired_at(now));

        creds.expires_at = Some(now.timestamp());
        assert!(creds.is_expired_at(now));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::from_key_values(SAMPLE).unwrap();
        let dbg = format!("{:?}", creds);
        assert!(!dbg.contains("shh"));
        assert!(!dbg.contains("def=ghi"));
        assert!(dbg.contains("777"));
    }
}
