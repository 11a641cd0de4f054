//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and a create DTO for inserts. There are no update DTOs:
//! audit events are append-only.

pub mod audit_event;
