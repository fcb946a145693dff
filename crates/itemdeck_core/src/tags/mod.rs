//! Tag-derived views and the tag pill editor.
//!
//! # Responsibility
//! - Derive the unique tag set from live records on demand.
//! - Provide suggestion lookups and pill editing for tag input.
//!
//! # Invariants
//! - Tag views are never persisted on their own.
//! - Every tag leaving this module is normalized (trimmed, lowercase).

pub mod index;
pub mod input;

pub use index::{suggest_tags, unique_tags, DEFAULT_SUGGESTION_LIMIT};
pub use input::TagInput;
