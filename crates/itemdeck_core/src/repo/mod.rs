//! Record store layer.
//!
//! # Responsibility
//! - Define the record CRUD contract used by services.
//! - Isolate serialization and backend details from business orchestration.
//!
//! # Invariants
//! - Store writes enforce `Record::validate()` before persistence.
//! - Store APIs return semantic errors (`NotFound`, `Validation`) in addition
//!   to backend transport errors.

pub mod record_store;
