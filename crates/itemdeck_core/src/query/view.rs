//! Composed list view query.

use super::search::search;
use super::sort::sort;
use super::tag_filter::filter_by_tag;
use crate::model::record::Record;

/// Caller-owned view state for the item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Search text; empty means no search.
    pub search: String,
    /// Tag selector; see [`filter_by_tag`].
    pub tag: Option<String>,
    /// Sort selector such as `name-asc`; `None` keeps stored order.
    pub sort: Option<String>,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Applies search, then tag filter, then sort.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        let searched = search(&self.search, records);
        let filtered = filter_by_tag(self.tag.as_deref(), &searched);
        match self.sort.as_deref() {
            Some(criterion) => sort(criterion, &filtered),
            None => filtered,
        }
    }
}
