// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod analysis;
pub mod merge;
pub mod normalize;
pub mod pagination;
pub mod strava;
pub mod token;

pub use activity::{ActivitySync, FetchMode, SyncReport};
pub use merge::{merge, MergeResult};
pub use pagination::{ClubFeed, PageCount};
pub use strava::StravaClient;
pub use token::TokenManager;
