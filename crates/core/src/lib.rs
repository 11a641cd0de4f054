//! Domain building blocks for the audit trail service.
//!
//! This crate has zero internal dependencies so the persistence layer and the
//! HTTP layer can both share its error taxonomy and event-type vocabulary.

pub mod error;
pub mod event_type;
pub mod types;
