//! Application identity and storage key configuration.
//!
//! # Invariants
//! - `collection_key` is derived once from `app_id` and never recomputed.

/// Application id used when none is configured.
pub const DEFAULT_APP_ID: &str = "testApp";
/// Database file name inside the data directory.
pub const DEFAULT_DB_FILE_NAME: &str = "itemdeck.sqlite3";
/// Environment variable consulted for the data directory.
pub const DATA_DIR_ENV: &str = "ITEMDECK_DATA_DIR";

/// Resolved configuration shared by store, transfer and CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    app_id: String,
    collection_key: String,
    db_file_name: String,
}

impl AppConfig {
    /// Builds a configuration for `app_id`; blank ids fall back to the default.
    pub fn new(app_id: &str) -> Self {
        let app_id = match app_id.trim() {
            "" => DEFAULT_APP_ID.to_string(),
            value => value.to_string(),
        };
        let collection_key = format!("{app_id}_items");
        Self {
            app_id,
            collection_key,
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Backend key holding the serialized record collection.
    pub fn collection_key(&self) -> &str {
        &self.collection_key
    }

    pub fn db_file_name(&self) -> &str {
        &self.db_file_name
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_APP_ID)
    }
}
