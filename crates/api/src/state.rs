use std::sync::Arc;

use audit_trail_db::store::AuditEventStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence capability for audit events.
    pub store: Arc<dyn AuditEventStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AuditEventStore>) -> Self {
        Self { store }
    }
}
