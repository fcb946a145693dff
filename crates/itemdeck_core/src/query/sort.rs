//! Multi-key record sort.

use crate::model::record::Record;
use std::cmp::Ordering;

/// Recognized sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    NameAsc,
    NameDesc,
    CreatedAsc,
    CreatedDesc,
    ModifiedAsc,
    ModifiedDesc,
}

impl SortCriterion {
    /// Parses a selector value such as `name-asc`.
    ///
    /// Returns `None` for unrecognized values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            "created-asc" => Some(Self::CreatedAsc),
            "created-desc" => Some(Self::CreatedDesc),
            "modified-asc" => Some(Self::ModifiedAsc),
            "modified-desc" => Some(Self::ModifiedDesc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::CreatedAsc => "created-asc",
            Self::CreatedDesc => "created-desc",
            Self::ModifiedAsc => "modified-asc",
            Self::ModifiedDesc => "modified-desc",
        }
    }

    fn is_descending(self) -> bool {
        matches!(self, Self::NameDesc | Self::CreatedDesc | Self::ModifiedDesc)
    }

    fn compare_ascending(self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::NameAsc | Self::NameDesc => locale_cmp(&a.name, &b.name),
            Self::CreatedAsc | Self::CreatedDesc => a.created.cmp(&b.created),
            Self::ModifiedAsc | Self::ModifiedDesc => a.modified.cmp(&b.modified),
        }
    }
}

/// Sorts by a selector string; unrecognized selectors keep input order.
pub fn sort(criterion: &str, records: &[Record]) -> Vec<Record> {
    sort_by_criterion(SortCriterion::parse(criterion), records)
}

/// Sorts a copy of `records`.
///
/// Descending orders are the exact reverse of the ascending order, ties
/// included.
pub fn sort_by_criterion(criterion: Option<SortCriterion>, records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    let Some(criterion) = criterion else {
        return sorted;
    };

    sorted.sort_by(|a, b| criterion.compare_ascending(a, b));
    if criterion.is_descending() {
        sorted.reverse();
    }
    sorted
}

/// Human-oriented string ordering.
///
/// Letters compare case-insensitively first; strings equal under that
/// comparison put lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}
