//! Unique tag index and suggestion lookup.

use crate::model::record::{normalize_tag, Record};
use std::collections::BTreeSet;

/// Suggestion cap used by callers that do not choose one.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Returns every tag used by `records`, deduplicated and sorted ascending.
pub fn unique_tags(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| record.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Finds known tags containing the partial input.
///
/// Tags listed in `exclude` (already selected pills) are skipped. Prefix
/// matches come first, then other substring matches; each group is
/// alphabetical. Blank input yields no suggestions.
pub fn suggest_tags(
    partial: &str,
    records: &[Record],
    exclude: &[String],
    limit: usize,
) -> Vec<String> {
    let Some(needle) = normalize_tag(partial) else {
        return Vec::new();
    };

    let candidates = unique_tags(records)
        .into_iter()
        .filter(|tag| tag.contains(needle.as_str()))
        .filter(|tag| !exclude.iter().any(|selected| selected == tag));

    let (mut prefixed, mut contained): (Vec<String>, Vec<String>) =
        candidates.partition(|tag| tag.starts_with(needle.as_str()));
    prefixed.append(&mut contained);
    prefixed.truncate(limit);
    prefixed
}
