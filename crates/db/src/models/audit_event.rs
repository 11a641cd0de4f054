//! Audit log event entity and create DTO.
//!
//! Rows are immutable once written: there is no `updated_at` column and no
//! update DTO.

use audit_trail_core::error::CoreError;
use audit_trail_core::types::{EventId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A single recorded audit event, as stored and as returned to callers.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AuditLogEvent {
    pub event_id: EventId,
    pub event_type: String,
    pub created_at: Timestamp,
    pub client_id: String,
    pub user_id: Option<String>,
    pub request_method: String,
    pub status: Option<i32>,
    pub entity_json: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for inserting a new audit event.
///
/// `event_id` is generated by the store when `None`. `created_at` is never
/// accepted from callers; the store stamps it at insert time. Length limits
/// mirror the `VARCHAR` widths in the schema.
#[derive(Debug, Clone, Validate)]
pub struct CreateAuditLogEvent {
    pub event_id: Option<EventId>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub event_type: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub client_id: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub user_id: Option<String>,
    #[validate(length(max = 10, message = "must be at most 10 characters"))]
    pub request_method: String,
    pub status: Option<i32>,
    pub entity_json: Option<serde_json::Value>,
}

impl CreateAuditLogEvent {
    /// Run the column-width checks, reporting the first offending field
    /// (alphabetically, so the result is deterministic).
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errors| validation_failure(&errors))
    }
}

fn validation_failure(errors: &ValidationErrors) -> CoreError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    match fields.first() {
        Some((field, field_errors)) => {
            let reason = field_errors
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "is invalid".to_string());
            CoreError::Validation {
                field: field.to_string(),
                reason,
            }
        }
        None => CoreError::Validation {
            field: "payload".to_string(),
            reason: errors.to_string(),
        },
    }
}
