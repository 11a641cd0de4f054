//! The persistence capability HTTP handlers are written against.
//!
//! [`AuditEventStore`] is injected into the application state as an
//! `Arc<dyn AuditEventStore>`, so handlers run unchanged against PostgreSQL
//! in production and against [`MemoryAuditEventStore`] in tests.

mod memory;
mod postgres;

use async_trait::async_trait;
use audit_trail_core::types::EventId;

use crate::models::audit_event::{AuditLogEvent, CreateAuditLogEvent};

pub use memory::MemoryAuditEventStore;
pub use postgres::PgAuditEventStore;

/// Failure inside the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An event with the supplied id already exists. Nothing was written.
    #[error("Audit event {0} already exists")]
    DuplicateEventId(EventId),

    /// Any other database failure. The in-flight transaction was rolled back.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only storage for audit events.
#[async_trait]
pub trait AuditEventStore: Send + Sync {
    /// Persist a new event atomically, assigning `event_id` (when absent)
    /// and `created_at`.
    async fn insert(&self, input: &CreateAuditLogEvent) -> Result<AuditLogEvent, StoreError>;

    /// Exact-match lookup by id.
    async fn find_by_id(&self, event_id: EventId) -> Result<Option<AuditLogEvent>, StoreError>;

    /// Every stored event, in the backend's natural order.
    async fn list_all(&self) -> Result<Vec<AuditLogEvent>, StoreError>;

    /// Confirm the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
