//! Repository for the `audit_log_events` table.

use audit_trail_core::types::{EventId, Timestamp};
use sqlx::PgPool;

use crate::models::audit_event::{AuditLogEvent, CreateAuditLogEvent};

/// Column list for `audit_log_events` SELECT and RETURNING clauses.
const COLUMNS: &str = "\
    event_id, event_type, created_at, client_id, user_id, \
    request_method, status, entity_json";

/// Provides insert and read operations for audit events. There are no
/// update or delete operations.
pub struct AuditEventRepo;

impl AuditEventRepo {
    /// Insert a single audit event inside its own transaction.
    ///
    /// The caller supplies the final `event_id` and `created_at`. On any
    /// failure the transaction is rolled back before the error is returned.
    pub async fn create(
        pool: &PgPool,
        event_id: EventId,
        created_at: Timestamp,
        input: &CreateAuditLogEvent,
    ) -> Result<AuditLogEvent, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO audit_log_events ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, AuditLogEvent>(&query)
            .bind(event_id)
            .bind(&input.event_type)
            .bind(created_at)
            .bind(&input.client_id)
            .bind(&input.user_id)
            .bind(&input.request_method)
            .bind(input.status)
            .bind(&input.entity_json)
            .fetch_one(&mut *tx)
            .await;

        match inserted {
            Ok(event) => {
                tx.commit().await?;
                Ok(event)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Audit event insert rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Find an audit event by its id.
    pub async fn find_by_id(
        pool: &PgPool,
        event_id: EventId,
    ) -> Result<Option<AuditLogEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_log_events WHERE event_id = $1");
        sqlx::query_as::<_, AuditLogEvent>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// List every stored audit event in store-default order, unfiltered.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AuditLogEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_log_events");
        sqlx::query_as::<_, AuditLogEvent>(&query)
            .fetch_all(pool)
            .await
    }
}
