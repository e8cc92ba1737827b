// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token lifecycle for the club credentials.

use crate::error::AppError;
use crate::models::Credentials;
use crate::services::StravaClient;
use crate::time_utils::from_unix;
use chrono::{DateTime, Utc};

/// Owns the credentials for one run and keeps the access token valid.
pub struct TokenManager<'a> {
    client: &'a StravaClient,
    credentials: &'a mut Credentials,
}

impl<'a> TokenManager<'a> {
    pub fn new(client: &'a StravaClient, credentials: &'a mut Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Refresh the access token if it has expired (or its expiry is unknown).
    ///
    /// Returns `true` when a refresh was performed. On failure the credentials
    /// are left untouched.
    pub async fn ensure_valid(&mut self) -> Result<bool, AppError> {
        self.ensure_valid_at(Utc::now()).await
    }

    /// Same as [`ensure_valid`](Self::ensure_valid) with an explicit clock.
    pub async fn ensure_valid_at(&mut self, now: DateTime<Utc>) -> Result<bool, AppError> {
        if !self.credentials.is_expired_at(now) {
            tracing::debug!(
                expires_at = ?self.credentials.expires_at.and_then(from_unix),
                "Access token still valid"
            );
            return Ok(false);
        }

        tracing::info!(club_id = %self.credentials.club_id, "Access token expired, refreshing");

        let new_tokens = self
            .client
            .refresh_token(
                &self.credentials.client_id,
                &self.credentials.client_secret,
                &self.credentials.refresh_token,
            )
            .await?;

        self.credentials.apply_refresh(new_tokens);

        tracing::info!(
            expires_at = ?self.credentials.expires_at.and_then(from_unix),
            "Token refreshed"
        );
        Ok(true)
    }

    /// Current access token.
    pub fn access_token(&self) -> &str {
        &self.credentials.access_token
    }

    pub fn credentials(&self) -> &Credentials {
        &*self.credentials
    }
}
