//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, query, merge and transfer calls into use-case APIs.
//! - Keep UI layers decoupled from storage details.

pub mod item_service;
