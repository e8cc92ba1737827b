// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club activity sync.
//!
//! Handles the core workflow:
//! 1. Make sure the access token is valid (refresh if expired)
//! 2. Fetch feed pages 1..=N from Strava
//! 3. Normalize entries into dataset rows
//! 4. Merge with the stored dataset (incremental) or replace it (repeat)
//! 5. Save the result
//!
//! Nothing is written unless every page was fetched.

use crate::db::DatasetStore;
use crate::error::Result;
use crate::models::{Credentials, Dataset};
use crate::services::merge::merge;
use crate::services::normalize::normalize_all;
use crate::services::pagination::{ClubFeed, PageCount};
use crate::services::{StravaClient, TokenManager};
use serde::Serialize;

/// How fetched records are combined with the stored dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Overwrite the file with exactly the fetched pages, no dedup.
    Repeat,
    /// Append records not already in the file.
    Incremental,
}

/// Summary of a completed sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub mode: FetchMode,
    pub pages: u32,
    /// Entries returned by Strava
    pub fetched: usize,
    /// Records written that were not in the file before
    pub added: usize,
    /// Entries dropped as already present
    pub skipped: usize,
    /// Records in the saved dataset
    pub total: usize,
    pub token_refreshed: bool,
}

/// Fetches a club's feed and keeps the stored dataset up to date.
pub struct ActivitySync<'a> {
    client: &'a StravaClient,
    store: &'a DatasetStore,
}

impl<'a> ActivitySync<'a> {
    pub fn new(client: &'a StravaClient, store: &'a DatasetStore) -> Self {
        Self { client, store }
    }

    /// Run one sync.
    ///
    /// `credentials` may have been refreshed even when this returns an error;
    /// the caller is responsible for persisting them.
    pub async fn run(
        &self,
        credentials: &mut Credentials,
        mode: FetchMode,
        pages: PageCount,
    ) -> Result<SyncReport> {
        tracing::info!(club_id = %credentials.club_id, ?mode, pages = pages.get(), "Starting club sync");

        // 1. Token
        let mut tokens = TokenManager::new(self.client, credentials);
        let token_refreshed = tokens.ensure_valid().await?;
        let credentials = tokens.credentials();

        // 2. Fetch (all pages or nothing)
        let feed = ClubFeed::new(self.client, &credentials.access_token, &credentials.club_id);
        let raw = feed.fetch_all(pages).await?;
        let fetched = raw.len();

        // 3. Normalize
        let records = normalize_all(raw);

        // 4. Combine
        let (dataset, added, skipped) = match mode {
            FetchMode::Repeat => {
                let dataset = Dataset::from(records);
                let added = dataset.len();
                (dataset, added, 0)
            }
            FetchMode::Incremental => {
                let existing = self.store.load();
                let result = merge(existing, records);
                (result.dataset, result.added, result.skipped)
            }
        };

        // 5. Persist
        self.store.save(&dataset)?;

        let report = SyncReport {
            mode,
            pages: pages.get(),
            fetched,
            added,
            skipped,
            total: dataset.len(),
            token_refreshed,
        };
        tracing::info!(
            fetched = report.fetched,
            added = report.added,
            skipped = report.skipped,
            total = report.total,
            path = %self.store.path().display(),
            "Club sync complete"
        );
        Ok(report)
    }
}
