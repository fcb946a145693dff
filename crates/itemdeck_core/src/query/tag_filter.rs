//! Tag selector filter.

use crate::model::record::Record;

/// Reserved selector matching records without tags.
pub const NO_TAGS_SENTINEL: &str = "__no_tags__";

/// Filters records by tag selector.
///
/// - `None` or `""`: all records.
/// - [`NO_TAGS_SENTINEL`]: only untagged records.
/// - anything else: records carrying exactly that tag.
pub fn filter_by_tag(selector: Option<&str>, records: &[Record]) -> Vec<Record> {
    match selector {
        None | Some("") => records.to_vec(),
        Some(NO_TAGS_SENTINEL) => records
            .iter()
            .filter(|record| record.is_untagged())
            .cloned()
            .collect(),
        Some(tag) => records
            .iter()
            .filter(|record| record.has_tag(tag))
            .cloned()
            .collect(),
    }
}
