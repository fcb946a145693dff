//! Tag pill editor state.
//!
//! Models the tag entry widget without any presentation: committed tags
//! are "pills", typed text becomes pills on commit, and suggestions are
//! filtered against the live tag index.

use super::index::suggest_tags;
use crate::model::record::{normalize_tag, Record};

/// Editable set of tag pills, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInput {
    pills: Vec<String>,
}

impl TagInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the editor from an existing record's tags.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = Self::new();
        for tag in tags {
            input.add(tag.as_ref());
        }
        input
    }

    /// Adds one pill. Returns `false` for blank or duplicate values.
    pub fn add(&mut self, raw: &str) -> bool {
        let Some(tag) = normalize_tag(raw) else {
            return false;
        };
        if self.contains(&tag) {
            return false;
        }
        self.pills.push(tag);
        true
    }

    /// Commits typed text, splitting on commas. Returns the number of new pills.
    pub fn commit_text(&mut self, text: &str) -> usize {
        text.split(',').filter(|piece| self.add(piece)).count()
    }

    /// Removes one pill. Returns whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let Some(tag) = normalize_tag(tag) else {
            return false;
        };
        let before = self.pills.len();
        self.pills.retain(|pill| *pill != tag);
        self.pills.len() != before
    }

    /// Removes the most recently added pill (backspace on empty text).
    pub fn remove_last(&mut self) -> Option<String> {
        self.pills.pop()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.pills.iter().any(|pill| pill == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.pills
    }

    pub fn is_empty(&self) -> bool {
        self.pills.is_empty()
    }

    /// Drops all pills when the editor is torn down or the form resets.
    pub fn clear(&mut self) {
        self.pills.clear();
    }

    pub fn into_tags(self) -> Vec<String> {
        self.pills
    }

    /// Suggestions for the partially typed text, excluding current pills.
    pub fn suggestions(&self, partial: &str, records: &[Record], limit: usize) -> Vec<String> {
        suggest_tags(partial, records, &self.pills, limit)
    }
}
