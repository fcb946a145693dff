//! Last-writer-wins merge of two record collections.
//!
//! # Responsibility
//! - Reconcile an incoming collection with the current one by `id`.
//! - Report how many records were added, replaced or left unchanged.
//!
//! # Invariants
//! - Pure: no I/O, no clock reads.
//! - Current records keep their positions; new records follow in incoming order.
//! - A known record is replaced only when `incoming.modified > existing.modified`.

use crate::model::record::Record;
use std::collections::HashMap;

/// Outcome of [`merge_with_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Merged collection, ready for `replace_all`.
    pub records: Vec<Record>,
    /// Incoming records with ids unknown to the current collection.
    pub added: usize,
    /// Existing records replaced by a strictly newer incoming version.
    pub updated: usize,
    /// Incoming records ignored because they were not newer.
    pub unchanged: usize,
}

impl MergeReport {
    /// Returns whether the merge changed anything.
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.updated == 0
    }
}

/// Merges `incoming` into `current` and returns the combined collection.
pub fn merge(current: &[Record], incoming: &[Record]) -> Vec<Record> {
    merge_with_report(current, incoming).records
}

/// Same as [`merge`], with per-outcome counts.
pub fn merge_with_report(current: &[Record], incoming: &[Record]) -> MergeReport {
    let mut records = current.to_vec();
    let mut positions: HashMap<String, usize> = records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.id.clone(), position))
        .collect();
    let mut added = 0;
    let mut updated = 0;
    let mut unchanged = 0;

    for candidate in incoming {
        let existing = positions.get(candidate.id.as_str()).copied();
        match existing {
            Some(position) => {
                if candidate.modified > records[position].modified {
                    records[position] = candidate.clone();
                    updated += 1;
                } else {
                    unchanged += 1;
                }
            }
            None => {
                positions.insert(candidate.id.clone(), records.len());
                records.push(candidate.clone());
                added += 1;
            }
        }
    }

    MergeReport {
        records,
        added,
        updated,
        unchanged,
    }
}
