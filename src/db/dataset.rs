// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flat-file storage for the club dataset.
//!
//! The primary file is CSV with a fixed header. An optional JSON mirror with
//! the same base name carries identical records for record-oriented readers.

use crate::db::files::StagedFile;
use crate::error::AppError;
use crate::models::{ActivityRecord, Dataset, COLUMNS};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CSV_EXTENSION: &str = "csv";
const JSON_EXTENSION: &str = "json";

/// Normalize a user-supplied output name to a `.csv` path.
///
/// Names that already carry a `csv` extension are kept; anything else gets
/// `.csv` appended.
pub fn csv_path(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    let has_csv_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));

    if has_csv_extension {
        path
    } else {
        PathBuf::from(format!("{}.{}", name, CSV_EXTENSION))
    }
}

/// Dataset file store.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
    mirror_json: bool,
}

impl DatasetStore {
    /// Store backed by a CSV file only.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mirror_json: false,
        }
    }

    /// Also write a JSON mirror next to the CSV file on every save.
    pub fn with_json_mirror(mut self, enabled: bool) -> Self {
        self.mirror_json = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the JSON mirror (same base name, `.json`).
    pub fn json_path(&self) -> PathBuf {
        self.path.with_extension(JSON_EXTENSION)
    }

    /// Load the previously saved dataset.
    ///
    /// A missing or unreadable file yields an empty dataset.
    pub fn load(&self) -> Dataset {
        match self.try_load() {
            Ok(dataset) => {
                tracing::info!(path = %self.path.display(), records = dataset.len(), "Loaded dataset");
                dataset
            }
            Err(LoadError::Missing) => {
                tracing::info!(path = %self.path.display(), "No existing dataset, starting empty");
                Dataset::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Dataset unreadable, starting empty"
                );
                Dataset::new()
            }
        }
    }

    fn try_load(&self) -> Result<Dataset, LoadError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::Missing,
            _ => LoadError::Io(e),
        })?;
        read_csv(&bytes)
    }

    /// Overwrite the stored dataset (and its JSON mirror, if enabled).
    ///
    /// Every file is fully staged before any target is replaced.
    pub fn save(&self, dataset: &Dataset) -> Result<(), AppError> {
        let csv = write_csv(dataset)?;
        let mut staged = vec![(self.path.clone(), stage(&self.path, &csv)?)];

        if self.mirror_json {
            let json_path = self.json_path();
            let json = serde_json::to_vec_pretty(dataset)
                .map_err(|e| AppError::Storage(format!("JSON encoding failed: {}", e)))?;
            let file = stage(&json_path, &json)?;
            staged.push((json_path, file));
        }

        for (path, file) in staged {
            file.commit().map_err(|e| storage_error(&path, e))?;
            tracing::info!(path = %path.display(), records = dataset.len(), "Saved dataset");
        }
        Ok(())
    }
}

fn stage(path: &Path, content: &[u8]) -> Result<StagedFile, AppError> {
    StagedFile::write(path, content).map_err(|e| storage_error(path, e))
}

fn storage_error(path: &Path, e: io::Error) -> AppError {
    AppError::Storage(format!("{}: {}", path.display(), e))
}

/// Serialize a dataset to CSV, header included even when empty.
pub fn write_csv(dataset: &Dataset) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    let encode = |e: csv::Error| AppError::Storage(format!("CSV encoding failed: {}", e));

    writer.write_record(COLUMNS).map_err(encode)?;
    for record in dataset {
        writer.serialize(record).map_err(encode)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Storage(format!("CSV encoding failed: {}", e)))
}

/// Parse CSV produced by [`write_csv`] (or any file with the same header names).
///
/// Rows shorter than the header are padded with empty cells, so the columns
/// they lack read as empty text or absent numbers. Older repeat-mode files
/// have no `workout_type` cell.
pub fn read_csv(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader.headers().map_err(LoadError::Csv)?.clone();

    reader
        .records()
        .map(|row| {
            let mut row = row?;
            while row.len() < headers.len() {
                row.push_field("");
            }
            row.deserialize::<ActivityRecord>(Some(&headers))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Dataset::from)
        .map_err(LoadError::Csv)
}

/// Reasons a dataset file could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file does not exist")]
    Missing,

    #[error("failed to read file: {0}")]
    Io(#[source] io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[source] csv::Error),
}
