// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for the club activity feed.
//!
//! Handles:
//! - Token refresh against the OAuth endpoint
//! - Fetching single pages of a club's activity feed
//! - Rate limit detection (logged, never retried)

use crate::config::Config;
use crate::error::AppError;
use crate::models::TokenRefreshResponse;
use serde::Deserialize;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
}

impl StravaClient {
    /// Create a new Strava client using the configured endpoints and timeout.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
        })
    }

    /// Exchange a refresh token for a new token set.
    ///
    /// POST {token_url}
    /// form: client_id, client_secret, grant_type=refresh_token, refresh_token
    pub async fn refresh_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::Authentication {
                reason: format!("Token refresh request failed: {}", e),
                body: String::new(),
            })?;

        if !response.status().is_success() {
            let failure = HttpFailure::read(response).await;
            tracing::error!(status = %failure.status, body = %failure.body, "Strava token refresh rejected");
            return Err(AppError::Authentication {
                reason: failure.reason,
                body: failure.body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Authentication {
                reason: format!("Failed to parse token response: {}", e),
                body: String::new(),
            })
    }

    /// Fetch one page of a club's activity feed (most recent first).
    ///
    /// GET {base_url}/clubs/{club_id}/activities?page={page}&per_page={per_page}
    pub async fn list_club_activities(
        &self,
        access_token: &str,
        club_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ClubActivity>, AppError> {
        let url = format!(
            "{}/clubs/{}/activities",
            self.base_url,
            urlencoding::encode(club_id)
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .send()
            .await
            .map_err(|e| AppError::Fetch {
                page,
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let failure = HttpFailure::read(response).await;
            return Err(AppError::Fetch {
                page,
                reason: format!("HTTP {}: {}", failure.status, failure.body),
            });
        }

        response.json().await.map_err(|e| AppError::Fetch {
            page,
            reason: format!("JSON parse error: {}", e),
        })
    }
}

/// Details of a non-success response.
struct HttpFailure {
    status: reqwest::StatusCode,
    reason: String,
    body: String,
}

impl HttpFailure {
    async fn read(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Strava rate limit hit (429)");
        }

        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());

        Self {
            status,
            reason,
            body,
        }
    }
}

/// Activity entry from the club feed.
///
/// Club feeds are sparse: no IDs, no dates, and any field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubActivity {
    #[serde(default)]
    pub athlete: Option<ClubAthlete>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub moving_time: Option<u64>,
    #[serde(default)]
    pub elapsed_time: Option<u64>,
    #[serde(default)]
    pub total_elevation_gain: Option<f64>,
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub sport_type: Option<String>,
}

/// Athlete summary embedded in a club activity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubAthlete {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}
