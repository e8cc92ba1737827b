// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credentials file: read once at start, rewritten at the end of the run.

use crate::db::files::write_atomic;
use crate::error::AppError;
use crate::models::Credentials;
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the `key=value` credentials record.
#[derive(Debug, Clone)]
pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the credentials.
    pub fn load(&self) -> Result<Credentials, AppError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Configuration(format!(
                "Could not open the file {}: {}. Please ensure the file exists and contains the necessary credentials",
                self.path.display(),
                e
            ))
        })?;

        let credentials = Credentials::from_key_values(&text)?;
        tracing::info!(path = %self.path.display(), club_id = %credentials.club_id, "Credentials loaded");
        Ok(credentials)
    }

    /// Replace the file with the serialized credentials.
    pub fn save(&self, credentials: &Credentials) -> Result<(), AppError> {
        write_atomic(&self.path, credentials.to_key_values().as_bytes()).map_err(|e| {
            AppError::Storage(format!(
                "Failed to save credentials to {}: {}",
                self.path.display(),
                e
            ))
        })?;
        tracing::info!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }
}
