// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sequential pagination over a club's activity feed.
//!
//! Pages are requested strictly in order, one at a time, starting from page 1.
//! The first failing page ends the sequence; nothing is retried.

use crate::config::{MAX_PAGES, PER_PAGE};
use crate::error::AppError;
use crate::services::strava::{ClubActivity, StravaClient};
use futures_util::{pin_mut, stream, Stream, TryStreamExt};

/// Number of feed pages to fetch, validated against Strava's limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCount(u32);

impl PageCount {
    /// Validate a requested page count: must be within `1..=MAX_PAGES`.
    pub fn new(pages: i64) -> Result<Self, AppError> {
        if pages < 1 {
            return Err(AppError::Validation(format!(
                "page count must be at least 1, got {}",
                pages
            )));
        }
        if pages > i64::from(MAX_PAGES) {
            return Err(AppError::Validation(format!(
                "page count cannot exceed {} (Strava request limit), got {}",
                MAX_PAGES, pages
            )));
        }
        Ok(Self(pages as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// 1-based page position, advancing monotonically up to the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    last: u32,
}

impl PageCursor {
    pub fn new(max_pages: PageCount) -> Self {
        Self {
            page: 1,
            last: max_pages.get(),
        }
    }

    /// Page to request next, or `None` once the last page has been issued.
    pub fn current(&self) -> Option<u32> {
        (self.page <= self.last).then_some(self.page)
    }

    pub fn advance(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }
}

/// One fetched page of raw feed entries.
#[derive(Debug, Clone)]
pub struct Page {
    pub number: u32,
    pub activities: Vec<ClubActivity>,
}

/// A club's activity feed, authorized with a fixed access token.
pub struct ClubFeed<'a> {
    client: &'a StravaClient,
    access_token: &'a str,
    club_id: &'a str,
}

impl<'a> ClubFeed<'a> {
    pub fn new(client: &'a StravaClient, access_token: &'a str, club_id: &'a str) -> Self {
        Self {
            client,
            access_token,
            club_id,
        }
    }

    /// Lazily fetch pages `1..=max_pages`, one request per poll.
    ///
    /// The stream yields at most one error and then ends. It cannot be
    /// restarted; calling this again issues every request anew.
    pub fn fetch_pages(
        &self,
        max_pages: PageCount,
    ) -> impl Stream<Item = Result<Page, AppError>> + 'a {
        let (client, access_token, club_id) = (self.client, self.access_token, self.club_id);

        stream::try_unfold(PageCursor::new(max_pages), move |cursor| async move {
            let Some(number) = cursor.current() else {
                return Ok::<_, AppError>(None);
            };

            let activities = client
                .list_club_activities(access_token, club_id, number, PER_PAGE)
                .await
                .inspect_err(|e| tracing::error!(page = number, error = %e, "Club feed page failed"))?;

            tracing::info!(page = number, count = activities.len(), "Fetched club feed page");
            if activities.is_empty() {
                tracing::debug!(page = number, "Club feed page was empty");
            }

            Ok(Some((
                Page {
                    number,
                    activities,
                },
                cursor.advance(),
            )))
        })
    }

    /// Fetch all pages and concatenate their entries in fetch order.
    ///
    /// Either every page succeeds or nothing is returned.
    pub async fn fetch_all(&self, max_pages: PageCount) -> Result<Vec<ClubActivity>, AppError> {
        let pages = self.fetch_pages(max_pages);
        pin_mut!(pages);

        let mut activities = Vec::new();
        while let Some(page) = pages.try_next().await? {
            activities.extend(page.activities);
        }
        Ok(activities)
    }
}
