//! Record store contract and key-value implementation.
//!
//! # Responsibility
//! - Own the authoritative record collection.
//! - Persist the whole collection through a `KeyValueBackend` on every write.
//!
//! # Invariants
//! - Every mutation is read-modify-write of the full collection.
//! - Validation and lookup failures abort before any backend write.
//! - `update` preserves `id`/`created` and strictly increases `modified`.

use crate::config::AppConfig;
use crate::db::{BackendError, KeyValueBackend};
use crate::model::clock::{Clock, SystemClock};
use crate::model::id::generate_id;
use crate::model::record::{
    normalize_tags, Record, RecordDraft, RecordId, RecordPatch, RecordValidationError,
};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store error.
#[derive(Debug)]
pub enum StoreError {
    /// Write input violates record invariants.
    Validation(RecordValidationError),
    /// Operation referenced an unknown id.
    NotFound(RecordId),
    /// Persisted collection cannot be decoded.
    Corrupt(String),
    /// Backend read/write failure, passed through unchanged.
    Backend(BackendError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::Corrupt(message) => write!(f, "stored item collection is unreadable: {message}"),
            Self::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Backend(err) => Some(err),
            Self::NotFound(_) | Self::Corrupt(_) => None,
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<BackendError> for StoreError {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

/// Store interface for record CRUD and whole-collection replacement.
pub trait RecordStore {
    /// Returns the full collection in stored order.
    fn get_all(&self) -> StoreResult<Vec<Record>>;
    /// Returns one record by id.
    fn get(&self, id: &str) -> StoreResult<Option<Record>>;
    /// Validates, stamps and appends a new record.
    fn create(&mut self, draft: RecordDraft) -> StoreResult<Record>;
    /// Replaces the mutable fields of an existing record.
    fn update(&mut self, id: &str, patch: RecordPatch) -> StoreResult<Record>;
    /// Removes a record; unknown ids are a no-op.
    fn delete(&mut self, id: &str) -> StoreResult<()>;
    /// Installs a full collection without per-record validation.
    fn replace_all(&mut self, records: Vec<Record>) -> StoreResult<()>;
}

/// Record store persisting a JSON array under one backend key.
pub struct KvRecordStore<B: KeyValueBackend, C: Clock = SystemClock> {
    backend: B,
    clock: C,
    key: String,
}

impl<B: KeyValueBackend> KvRecordStore<B, SystemClock> {
    /// Creates a store using wall-clock timestamps.
    pub fn new(backend: B, config: &AppConfig) -> Self {
        Self::with_clock(backend, config, SystemClock)
    }
}

impl<B: KeyValueBackend, C: Clock> KvRecordStore<B, C> {
    /// Creates a store with a caller-provided clock.
    pub fn with_clock(backend: B, config: &AppConfig, clock: C) -> Self {
        Self {
            backend,
            clock,
            key: config.collection_key().to_string(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn load(&self) -> StoreResult<Vec<Record>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|err| {
            error!(
                "event=store_load module=repo status=error key={} error_code=corrupt_collection error={}",
                self.key, err
            );
            StoreError::Corrupt(err.to_string())
        })
    }

    fn save(&mut self, records: &[Record]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        self.backend.set(&self.key, &raw).map_err(|err| {
            error!(
                "event=store_save module=repo status=error key={} count={} error={}",
                self.key,
                records.len(),
                err
            );
            StoreError::from(err)
        })
    }
}

impl<B: KeyValueBackend, C: Clock> RecordStore for KvRecordStore<B, C> {
    fn get_all(&self) -> StoreResult<Vec<Record>> {
        self.load()
    }

    fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        Ok(self.load()?.into_iter().find(|record| record.id == id))
    }

    fn create(&mut self, draft: RecordDraft) -> StoreResult<Record> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(RecordValidationError::EmptyName.into());
        }

        let mut records = self.load()?;
        let mut id = generate_id();
        while records.iter().any(|record| record.id == id) {
            id = generate_id();
        }

        let now = self.clock.now_ms();
        let record = Record {
            id,
            name: name.to_string(),
            content: draft.content,
            tags: normalize_tags(&draft.tags),
            created: now,
            modified: now,
        };
        record.validate()?;

        records.push(record.clone());
        self.save(&records)?;
        info!(
            "event=record_create module=repo status=ok id={} tag_count={} total={}",
            record.id,
            record.tags.len(),
            records.len()
        );
        Ok(record)
    }

    fn update(&mut self, id: &str, patch: RecordPatch) -> StoreResult<Record> {
        let mut records = self.load()?;
        let Some(slot) = records.iter_mut().find(|record| record.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        let name = patch.name.trim();
        if name.is_empty() {
            return Err(RecordValidationError::EmptyName.into());
        }

        let modified = self.clock.now_ms().max(slot.modified.saturating_add(1));
        let updated = Record {
            id: slot.id.clone(),
            name: name.to_string(),
            content: patch.content,
            tags: normalize_tags(&patch.tags),
            created: slot.created,
            modified,
        };
        updated.validate()?;
        *slot = updated.clone();

        self.save(&records)?;
        info!(
            "event=record_update module=repo status=ok id={} modified={}",
            updated.id, updated.modified
        );
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            debug!("event=record_delete module=repo status=noop id={id}");
            return Ok(());
        }

        self.save(&records)?;
        info!(
            "event=record_delete module=repo status=ok id={} total={}",
            id,
            records.len()
        );
        Ok(())
    }

    fn replace_all(&mut self, records: Vec<Record>) -> StoreResult<()> {
        self.save(&records)?;
        info!(
            "event=record_replace_all module=repo status=ok total={}",
            records.len()
        );
        Ok(())
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn get_all(&self) -> StoreResult<Vec<Record>> {
        (**self).get_all()
    }

    fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        (**self).get(id)
    }

    fn create(&mut self, draft: RecordDraft) -> StoreResult<Record> {
        (**self).create(draft)
    }

    fn update(&mut self, id: &str, patch: RecordPatch) -> StoreResult<Record> {
        (**self).update(id, patch)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn replace_all(&mut self, records: Vec<Record>) -> StoreResult<()> {
        (**self).replace_all(records)
    }
}

#[cfg(test)]
mod tests {
    use super::{KvRecordStore, RecordStore, StoreError};
    use crate::config::AppConfig;
    use crate::db::{KeyValueBackend, MemoryKeyValueBackend};
    use crate::model::clock::ManualClock;
    use crate::model::record::RecordDraft;

    #[test]
    fn corrupt_collection_is_reported_not_masked() {
        let config = AppConfig::default();
        let mut backend = MemoryKeyValueBackend::new();
        backend.set(config.collection_key(), "{not json").unwrap();
        let store = KvRecordStore::with_clock(backend, &config, ManualClock::new(1));

        let err = store.get_all().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn create_trims_stored_name() {
        let config = AppConfig::default();
        let mut store =
            KvRecordStore::with_clock(MemoryKeyValueBackend::new(), &config, ManualClock::new(7));

        let record = store.create(RecordDraft::new("  Milk  ")).unwrap();
        assert_eq!(record.name, "Milk");
        assert_eq!(record.created, 7);
        assert_eq!(record.modified, 7);
    }
}
