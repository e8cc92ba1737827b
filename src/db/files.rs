// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Atomic file replacement.
//!
//! Content is written to a temporary file next to the target and renamed over
//! it, so readers only ever see the old or the new file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Fully written temporary file waiting to replace its target.
pub struct StagedFile {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Write `content` to a temporary file in the target's directory.
    pub fn write(target: &Path, content: &[u8]) -> io::Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        Ok(Self {
            tmp,
            target: target.to_path_buf(),
        })
    }

    /// Rename the temporary file over the target.
    pub fn commit(self) -> io::Result<PathBuf> {
        self.tmp.persist(&self.target).map_err(|e| e.error)?;
        Ok(self.target)
    }
}

/// Atomically replace `target` with `content`.
pub fn write_atomic(target: &Path, content: &[u8]) -> io::Result<PathBuf> {
    StagedFile::write(target, content)?.commit()
}
