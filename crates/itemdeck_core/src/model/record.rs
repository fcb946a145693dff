//! Record domain model.
//!
//! # Responsibility
//! - Define the single persisted item shape (`Record`) and its write inputs.
//! - Own tag normalization shared by store, import and tag-input paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `name` is non-empty after trimming.
//! - `modified >= created`.
//! - `tags` are trimmed, lowercase, non-empty and unique.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque record identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = String;

/// Validation failures for record write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// `name` is empty after trimming.
    EmptyName,
    /// `modified` precedes `created`.
    ModifiedBeforeCreated { created: i64, modified: i64 },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name cannot be empty"),
            Self::ModifiedBeforeCreated { created, modified } => write!(
                f,
                "modified ({modified}) must be >= created ({created})"
            ),
        }
    }
}

impl Error for RecordValidationError {}

/// Canonical persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable id assigned at creation.
    pub id: RecordId,
    /// Display name, never blank.
    pub name: String,
    /// Free-text body.
    #[serde(default)]
    pub content: String,
    /// Normalized tag set, sorted ascending.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unix epoch milliseconds, set once.
    pub created: i64,
    /// Unix epoch milliseconds of the last successful edit.
    pub modified: i64,
}

impl Record {
    /// Checks the per-record invariants.
    ///
    /// Tag shape is not checked here; write paths normalize tags instead.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        if self.modified < self.created {
            return Err(RecordValidationError::ModifiedBeforeCreated {
                created: self.created,
                modified: self.modified,
            });
        }
        Ok(())
    }

    /// Returns whether the record carries no tags.
    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns whether the record carries exactly `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|value| value == tag)
    }
}

/// Input for creating a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub content: String,
    /// Raw tag values; normalized by the store.
    pub tags: Vec<String>,
}

impl RecordDraft {
    /// Creates a draft with a name and no content or tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets tags from comma-separated input such as `"dairy, grocery"`.
    pub fn with_tag_input(mut self, input: &str) -> Self {
        self.tags = parse_tag_input(input);
        self
    }
}

/// Full replacement of a record's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub name: String,
    pub content: String,
    /// Raw tag values; normalized by the store.
    pub tags: Vec<String>,
}

impl RecordPatch {
    /// Starts a patch from the current mutable fields of `record`.
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            content: record.content.clone(),
            tags: record.tags.clone(),
        }
    }
}

/// Normalizes one tag value.
///
/// Returns `None` for blank input.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates tag values.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            unique.insert(value);
        }
    }
    unique.into_iter().collect()
}

/// Splits comma-separated tag text and normalizes the pieces.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    let pieces = input.split(',').map(str::to_string).collect::<Vec<_>>();
    normalize_tags(&pieces)
}
