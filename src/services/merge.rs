// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Deduplicating merge of freshly fetched records into the persisted dataset.

use crate::models::{ActivityKey, ActivityRecord, Dataset};
use std::collections::HashSet;

/// Outcome of a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    pub dataset: Dataset,
    /// New records appended
    pub added: usize,
    /// New records dropped because their key was already present
    pub skipped: usize,
}

/// Append every new record whose key is not in `existing`.
///
/// Keys are taken from `existing` as it was when the merge started: records
/// accepted by this call are not compared with each other, so two identical
/// rows in the same batch are both kept. Existing rows keep their order and
/// accepted rows follow in input order.
pub fn merge(existing: Dataset, new_records: impl IntoIterator<Item = ActivityRecord>) -> MergeResult {
    let known: HashSet<ActivityKey> = existing.iter().map(ActivityRecord::key).collect();

    let mut dataset = existing;
    let mut added = 0;
    let mut skipped = 0;

    for record in new_records {
        if known.contains(&record.key()) {
            skipped += 1;
            continue;
        }
        dataset.push(record);
        added += 1;
    }

    tracing::debug!(added, skipped, total = dataset.len(), "Merged club activities");
    MergeResult {
        dataset,
        added,
        skipped,
    }
}
