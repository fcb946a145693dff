//! Case-insensitive text search.

use crate::model::record::Record;

/// Returns records whose name or content contains `query`, ignoring case.
///
/// An empty query returns the input unchanged.
pub fn search(query: &str, records: &[Record]) -> Vec<Record> {
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_query(record, &needle))
        .cloned()
        .collect()
}

fn matches_query(record: &Record, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle) || record.content.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::search;
    use crate::model::record::Record;

    fn record(id: &str, name: &str, content: &str) -> Record {
        Record {
            id: id.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            tags: Vec::new(),
            created: 1,
            modified: 1,
        }
    }

    #[test]
    fn empty_query_is_identity() {
        let records = vec![record("a", "Milk", ""), record("b", "Bread", "")];
        assert_eq!(search("", &records), records);
    }

    #[test]
    fn matches_name_or_content_ignoring_case() {
        let records = vec![
            record("a", "Milk", "whole"),
            record("b", "Bread", "buy WHOLE grain"),
            record("c", "Eggs", "dozen"),
        ];

        let hits = search("whOle", &records);
        let ids = hits.iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(search("cheese", &records).is_empty());
    }
}
