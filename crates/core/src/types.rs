/// Audit events are keyed by a UUID assigned once at ingest.
pub type EventId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
