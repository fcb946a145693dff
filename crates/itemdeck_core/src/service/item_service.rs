//! Item use-case service.
//!
//! # Responsibility
//! - Provide list/create/update/delete entry points for UI callers.
//! - Compose the query pipeline and tag index over live store contents.
//! - Run export and import (parse -> merge -> replace) flows.
//!
//! # Invariants
//! - Import never writes when the payload is malformed.
//! - View state (search text, tag selector, sort) is passed in, never held.

use crate::config::AppConfig;
use crate::merge::{merge_with_report, MergeReport};
use crate::model::record::{Record, RecordDraft, RecordId, RecordPatch, RecordValidationError};
use crate::query::ViewQuery;
use crate::repo::record_store::{RecordStore, StoreError};
use crate::tags::{suggest_tags, unique_tags};
use crate::transfer::{export_file_name, export_json, parse_import, ExportBundle, FormatError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PREVIEW_MAX_CHARS: usize = 80;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Service error for item use-cases.
#[derive(Debug)]
pub enum ItemServiceError {
    /// Required field missing or blank.
    Validation(RecordValidationError),
    /// Target item does not exist.
    NotFound(RecordId),
    /// Import payload is malformed, or the export could not be encoded.
    Format(FormatError),
    /// Storage failure.
    Store(StoreError),
}

impl Display for ItemServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ItemServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for ItemServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<FormatError> for ItemServiceError {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

/// Item service facade over a record store.
pub struct ItemService<S: RecordStore> {
    store: S,
    config: AppConfig,
}

impl<S: RecordStore> ItemService<S> {
    pub fn new(store: S, config: AppConfig) -> Self {
        Self { store, config }
    }

    /// Returns the full collection in stored order.
    pub fn all_items(&self) -> Result<Vec<Record>, ItemServiceError> {
        Ok(self.store.get_all()?)
    }

    /// Returns the list view for the caller's current view state.
    pub fn list_items(&self, view: &ViewQuery) -> Result<Vec<Record>, ItemServiceError> {
        let records = self.store.get_all()?;
        Ok(view.apply(&records))
    }

    /// Gets one item, failing with `NotFound` when absent.
    pub fn get_item(&self, id: &str) -> Result<Record, ItemServiceError> {
        self.store
            .get(id)?
            .ok_or_else(|| ItemServiceError::NotFound(id.to_string()))
    }

    pub fn create_item(&mut self, draft: RecordDraft) -> Result<Record, ItemServiceError> {
        Ok(self.store.create(draft)?)
    }

    pub fn update_item(
        &mut self,
        id: &str,
        patch: RecordPatch,
    ) -> Result<Record, ItemServiceError> {
        Ok(self.store.update(id, patch)?)
    }

    /// Deletes one item; unknown ids succeed without changes.
    pub fn delete_item(&mut self, id: &str) -> Result<(), ItemServiceError> {
        Ok(self.store.delete(id)?)
    }

    /// Unique tags across the live collection.
    pub fn tags(&self) -> Result<Vec<String>, ItemServiceError> {
        Ok(unique_tags(&self.store.get_all()?))
    }

    /// Tag suggestions for partially typed input.
    pub fn suggest_tags(
        &self,
        partial: &str,
        selected: &[String],
        limit: usize,
    ) -> Result<Vec<String>, ItemServiceError> {
        Ok(suggest_tags(partial, &self.store.get_all()?, selected, limit))
    }

    /// Exports the full collection with a file name stamped at `at`.
    pub fn export_at(&self, at: DateTime<Utc>) -> Result<ExportBundle, ItemServiceError> {
        let records = self.store.get_all()?;
        let bundle = ExportBundle {
            file_name: export_file_name(self.config.app_id(), at),
            body: export_json(&records)?,
        };
        info!(
            "event=export module=service status=ok count={} bytes={}",
            records.len(),
            bundle.body.len()
        );
        Ok(bundle)
    }

    pub fn export(&self) -> Result<ExportBundle, ItemServiceError> {
        self.export_at(Utc::now())
    }

    /// Computes the import outcome without writing.
    pub fn preview_import(&self, payload: &str) -> Result<MergeReport, ItemServiceError> {
        let incoming = parse_import(payload).map_err(|err| {
            warn!("event=import module=service status=rejected stage=parse error={err}");
            err
        })?;
        let current = self.store.get_all()?;
        Ok(merge_with_report(&current, &incoming))
    }

    /// Parses, merges and installs an import payload.
    ///
    /// Nothing is written when the payload is malformed or the merge
    /// changes nothing.
    pub fn import(&mut self, payload: &str) -> Result<MergeReport, ItemServiceError> {
        let report = self.preview_import(payload)?;
        if !report.is_noop() {
            self.store.replace_all(report.records.clone())?;
        }
        info!(
            "event=import module=service status=ok added={} updated={} unchanged={} total={}",
            report.added,
            report.updated,
            report.unchanged,
            report.records.len()
        );
        Ok(report)
    }
}

/// One-line content preview for list rows.
///
/// Collapses whitespace and keeps the first 80 characters; blank content
/// yields `None`.
pub fn content_preview(content: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut preview = trimmed.chars().take(PREVIEW_MAX_CHARS).collect::<String>();
    if trimmed.chars().count() > PREVIEW_MAX_CHARS {
        preview.push_str("...");
    }
    Some(preview)
}

#[cfg(test)]
mod tests {
    use super::content_preview;

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(
            content_preview("  two\n\nlines\tof text ").as_deref(),
            Some("two lines of text")
        );
        assert_eq!(content_preview(" \n "), None);
    }

    #[test]
    fn preview_truncates_long_content() {
        let preview = content_preview(&"x".repeat(200)).unwrap();
        assert_eq!(preview.chars().count(), 83);
        assert!(preview.ends_with("..."));
    }
}
