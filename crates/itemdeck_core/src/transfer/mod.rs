//! JSON export and import payloads.
//!
//! # Responsibility
//! - Serialize the full collection as a pretty-printed JSON array.
//! - Decode import payloads into records, rejecting anything that is not an
//!   array of record-shaped objects.
//! - Build the export file name.
//!
//! # Invariants
//! - Import requires `id`, `name` and `modified` on every entry; other
//!   fields default.
//! - Imported names are trimmed and never blank.
//! - Decoded records have normalized tags and `created <= modified`.

use crate::model::record::{normalize_tags, parse_tag_input, Record};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Export or import payload failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Collection could not be encoded for export.
    Encode(String),
    /// Payload is not valid JSON.
    InvalidJson(String),
    /// Payload parsed, but the top level is not an array.
    NotAnArray,
    /// One array element is not record-shaped.
    InvalidEntry { index: usize, message: String },
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(message) => write!(f, "failed to encode export payload: {message}"),
            Self::InvalidJson(message) => write!(f, "import payload is not valid JSON: {message}"),
            Self::NotAnArray => write!(f, "import payload must be a JSON array of items"),
            Self::InvalidEntry { index, message } => {
                write!(f, "import entry #{index} is invalid: {message}")
            }
        }
    }
}

impl Error for FormatError {}

/// Export body plus its suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub file_name: String,
    pub body: String,
}

/// Serializes records as a pretty-printed JSON array.
pub fn export_json(records: &[Record]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(records).map_err(|err| FormatError::Encode(err.to_string()))
}

/// Builds `<app_id>_export_<YYYY-MM-DDTHH-MM-SS>.json`.
pub fn export_file_name(app_id: &str, at: DateTime<Utc>) -> String {
    format!("{app_id}_export_{}.json", at.format("%Y-%m-%dT%H-%M-%S"))
}

/// Decodes an import payload.
pub fn parse_import(payload: &str) -> Result<Vec<Record>, FormatError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|err| FormatError::InvalidJson(err.to_string()))?;
    let Value::Array(entries) = value else {
        return Err(FormatError::NotAnArray);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(index, entry))
        .collect()
}

#[derive(Debug, Deserialize)]
struct ImportedRecord {
    id: String,
    modified: i64,
    name: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: ImportedTags,
    #[serde(default)]
    created: Option<i64>,
}

/// Older exports stored tags as one comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportedTags {
    List(Vec<String>),
    Text(String),
}

impl Default for ImportedTags {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

fn decode_entry(index: usize, entry: Value) -> Result<Record, FormatError> {
    if !entry.is_object() {
        return Err(FormatError::InvalidEntry {
            index,
            message: "expected an object".to_string(),
        });
    }

    let imported: ImportedRecord =
        serde_json::from_value(entry).map_err(|err| FormatError::InvalidEntry {
            index,
            message: err.to_string(),
        })?;
    if imported.id.trim().is_empty() {
        return Err(FormatError::InvalidEntry {
            index,
            message: "`id` cannot be empty".to_string(),
        });
    }
    let name = imported.name.trim();
    if name.is_empty() {
        return Err(FormatError::InvalidEntry {
            index,
            message: "`name` cannot be empty".to_string(),
        });
    }

    let tags = match imported.tags {
        ImportedTags::List(values) => normalize_tags(&values),
        ImportedTags::Text(text) => parse_tag_input(&text),
    };
    let created = imported
        .created
        .map_or(imported.modified, |created| created.min(imported.modified));

    Ok(Record {
        name: name.to_string(),
        id: imported.id,
        content: imported.content,
        tags,
        created,
        modified: imported.modified,
    })
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, export_json, parse_import, FormatError};
    use crate::model::record::Record;
    use chrono::{TimeZone, Utc};

    #[test]
    fn export_file_name_embeds_app_id_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(
            export_file_name("testApp", at),
            "testApp_export_2026-03-04T05-06-07.json"
        );
    }

    #[test]
    fn export_is_pretty_printed_array() {
        let records = vec![Record {
            id: "a".to_string(),
            name: "Milk".to_string(),
            content: String::new(),
            tags: vec!["dairy".to_string()],
            created: 1,
            modified: 2,
        }];
        let body = export_json(&records).unwrap();
        assert!(body.starts_with("[\n"));
        assert_eq!(parse_import(&body).unwrap(), records);
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn object_payload_is_rejected() {
        let err = parse_import(r#"{"id":"a","modified":1}"#).unwrap_err();
        assert_eq!(err, FormatError::NotAnArray);
    }

    #[test]
    fn invalid_json_and_missing_fields_are_rejected() {
        assert!(matches!(
            parse_import("not json"),
            Err(FormatError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_import(r#"[{"id":"a","name":"x"}]"#),
            Err(FormatError::InvalidEntry { index: 0, .. })
        ));
        assert!(matches!(
            parse_import(r#"[{"id":"a","name":"x","modified":1}, 7]"#),
            Err(FormatError::InvalidEntry { index: 1, .. })
        ));
        assert!(matches!(
            parse_import(r#"[{"id":" ","name":"x","modified":1}]"#),
            Err(FormatError::InvalidEntry { index: 0, .. })
        ));
    }

    #[test]
    fn missing_or_blank_names_are_rejected() {
        assert!(matches!(
            parse_import(r#"[{"id":"a","modified":5}]"#),
            Err(FormatError::InvalidEntry { index: 0, .. })
        ));
        let err = parse_import(r#"[{"id":"a","name":"ok","modified":5},{"id":"b","name":"  ","modified":5}]"#)
            .unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidEntry {
                index: 1,
                message: "`name` cannot be empty".to_string(),
            }
        );
        let trimmed = parse_import(r#"[{"id":"a","name":"  Milk ","modified":5}]"#).unwrap();
        assert_eq!(trimmed[0].name, "Milk");
    }

    #[test]
    fn lenient_fields_are_defaulted_and_normalized() {
        let records = parse_import(
            r#"[
                {"id":"a","modified":50,"name":"Legacy","tags":"Dairy, grocery","subItems":[]},
                {"id":"b","name":"Tagged","modified":10,"created":40,"tags":[" X ","x"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0].tags, vec!["dairy", "grocery"]);
        assert_eq!(records[0].created, 50);
        assert_eq!(records[0].content, "");
        assert_eq!(records[1].tags, vec!["x"]);
        assert_eq!(records[1].created, 10);
        assert_eq!(records[1].name, "Tagged");
    }
}
