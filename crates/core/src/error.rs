//! Domain error taxonomy shared by the persistence and HTTP layers.

/// Errors raised while validating, normalizing, or looking up audit events.
///
/// Storage failures are not represented here: they originate in the db
/// crate and are wrapped separately by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The request body could not be interpreted as an event payload.
    #[error("Invalid JSON provided.")]
    InvalidPayload(String),

    /// A required field or header was absent or empty.
    ///
    /// `field` is the human-facing label, e.g. `"Client ID"` or `"event_type"`.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A field was present but violates a column constraint.
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Lookup miss.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// Anything not classified above.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl CoreError {
    /// Shorthand for the missing `X-Client-ID` header.
    pub fn missing_client_id() -> Self {
        CoreError::MissingField { field: "Client ID" }
    }

    /// Shorthand for a missing or empty `event_type` body field.
    pub fn missing_event_type() -> Self {
        CoreError::MissingField {
            field: "event_type",
        }
    }

    /// Shorthand for an audit event lookup miss.
    pub fn event_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Event",
            id: id.into(),
        }
    }
}
