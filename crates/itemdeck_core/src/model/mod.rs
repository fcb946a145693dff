//! Domain model for managed items.
//!
//! # Responsibility
//! - Define the canonical record shape used by store, query and merge code.
//! - Provide identifier generation and the clock used for timestamps.
//!
//! # Invariants
//! - Every record is identified by a stable opaque `RecordId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod clock;
pub mod id;
pub mod record;
