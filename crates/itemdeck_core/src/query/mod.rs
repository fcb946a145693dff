//! Pure query pipeline over record slices.
//!
//! # Responsibility
//! - Provide search, tag filter and sort stages as stateless functions.
//! - Compose them in the fixed order search -> tag filter -> sort.
//!
//! # Invariants
//! - Stages never touch the store and never mutate their input.
//! - Search and tag filter preserve input order.

pub mod search;
pub mod sort;
pub mod tag_filter;
pub mod view;

pub use search::search;
pub use sort::{locale_cmp, sort, sort_by_criterion, SortCriterion};
pub use tag_filter::{filter_by_tag, NO_TAGS_SENTINEL};
pub use view::ViewQuery;
