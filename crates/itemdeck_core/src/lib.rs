//! Core domain logic for itemdeck.
//! This crate is the single source of truth for item invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod merge;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod tags;
pub mod transfer;

pub use config::AppConfig;
pub use db::{
    BackendError, KeyValueBackend, MemoryKeyValueBackend, SqliteKeyValueBackend,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use merge::{merge, merge_with_report, MergeReport};
pub use model::clock::{Clock, ManualClock, SystemClock};
pub use model::id::generate_id;
pub use model::record::{
    normalize_tag, normalize_tags, parse_tag_input, Record, RecordDraft, RecordId, RecordPatch,
    RecordValidationError,
};
pub use query::{
    filter_by_tag, search, sort, sort_by_criterion, SortCriterion, ViewQuery, NO_TAGS_SENTINEL,
};
pub use repo::record_store::{KvRecordStore, RecordStore, StoreError, StoreResult};
pub use service::item_service::{content_preview, ItemService, ItemServiceError};
pub use tags::{suggest_tags, unique_tags, TagInput, DEFAULT_SUGGESTION_LIMIT};
pub use transfer::{export_file_name, export_json, parse_import, ExportBundle, FormatError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
