// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Every variant is fatal to the run that produced it. The only local
//! recovery in the pipeline (a missing or unreadable dataset file) never
//! surfaces as an error.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Credentials source missing, empty or incomplete.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Token refresh rejected by Strava.
    #[error("Strava token refresh failed: {reason}: {body}")]
    Authentication { reason: String, body: String },

    /// A club feed page could not be fetched.
    #[error("Strava club feed request failed on page {page}: {reason}")]
    Fetch { page: u32, reason: String },

    /// Invalid user input, rejected before any I/O.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Dataset could not be written.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-friendly name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "configuration",
            AppError::Authentication { .. } => "authentication",
            AppError::Fetch { .. } => "fetch",
            AppError::Validation(_) => "validation",
            AppError::Storage(_) => "storage",
            AppError::Internal(_) => "internal",
        }
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
