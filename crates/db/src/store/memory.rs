use async_trait::async_trait;
use audit_trail_core::types::EventId;
use tokio::sync::RwLock;

use super::{AuditEventStore, StoreError};
use crate::models::audit_event::{AuditLogEvent, CreateAuditLogEvent};

/// Volatile [`AuditEventStore`] holding events in insertion order.
///
/// Used by tests and by `STORE_BACKEND=memory` deployments. The duplicate
/// check and the append happen under one write lock, so an insert is either
/// fully visible or not at all.
#[derive(Default)]
pub struct MemoryAuditEventStore {
    events: RwLock<Vec<AuditLogEvent>>,
}

impl MemoryAuditEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl AuditEventStore for MemoryAuditEventStore {
    async fn insert(&self, input: &CreateAuditLogEvent) -> Result<AuditLogEvent, StoreError> {
        let mut events = self.events.write().await;

        let event_id = input.event_id.unwrap_or_else(EventId::new_v4);
        if events.iter().any(|e| e.event_id == event_id) {
            return Err(StoreError::DuplicateEventId(event_id));
        }

        let event = AuditLogEvent {
            event_id,
            event_type: input.event_type.clone(),
            created_at: chrono::Utc::now(),
            client_id: input.client_id.clone(),
            user_id: input.user_id.clone(),
            request_method: input.request_method.clone(),
            status: input.status,
            entity_json: input.entity_json.clone(),
        };
        events.push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, event_id: EventId) -> Result<Option<AuditLogEvent>, StoreError> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.event_id == event_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<AuditLogEvent>, StoreError> {
        Ok(self.events.read().await.clone())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
