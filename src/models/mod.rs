// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod credentials;
pub mod stats;

pub use activity::{ActivityKey, ActivityRecord, Dataset, COLUMNS};
pub use credentials::{Credentials, TokenRefreshResponse};
pub use stats::{ClusterReport, ClusterSummary, RideCount, RideFeatures, Rider, RiderSpeed};
