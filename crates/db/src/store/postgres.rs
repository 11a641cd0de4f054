use async_trait::async_trait;
use audit_trail_core::types::EventId;

use super::{AuditEventStore, StoreError};
use crate::models::audit_event::{AuditLogEvent, CreateAuditLogEvent};
use crate::repositories::AuditEventRepo;
use crate::DbPool;

/// [`AuditEventStore`] backed by the `audit_log_events` table.
#[derive(Clone)]
pub struct PgAuditEventStore {
    pool: DbPool,
}

impl PgAuditEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditEventStore for PgAuditEventStore {
    async fn insert(&self, input: &CreateAuditLogEvent) -> Result<AuditLogEvent, StoreError> {
        let event_id = input.event_id.unwrap_or_else(EventId::new_v4);
        let created_at = chrono::Utc::now();

        AuditEventRepo::create(&self.pool, event_id, created_at, input)
            .await
            .map_err(|err| {
                let duplicate = matches!(
                    &err,
                    sqlx::Error::Database(db_err) if db_err.is_unique_violation()
                );
                if duplicate {
                    StoreError::DuplicateEventId(event_id)
                } else {
                    StoreError::Database(err)
                }
            })
    }

    async fn find_by_id(&self, event_id: EventId) -> Result<Option<AuditLogEvent>, StoreError> {
        Ok(AuditEventRepo::find_by_id(&self.pool, event_id).await?)
    }

    async fn list_all(&self) -> Result<Vec<AuditLogEvent>, StoreError> {
        Ok(AuditEventRepo::list_all(&self.pool).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
