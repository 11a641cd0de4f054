//! Well-known audit event types and event-type canonicalization.
//!
//! The enumeration is open-ended: a submitted `event_type` that matches one of
//! the known values exactly is replaced by the canonical value, and anything
//! else is accepted verbatim as a custom type. Nothing here ever rejects an
//! event type.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Known event types
// ---------------------------------------------------------------------------

/// Event types the service recognizes out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    UserLogin,
    UserLogout,
    UserRegistered,
    AccountCreated,
    AccountUpdated,
    AccountDeactivated,
    PaymentProcessed,
    BillingAdjusted,
    RefundIssued,
    ServiceRequested,
    ServiceCompleted,
    ServiceFailed,
    SystemStart,
    SystemShutdown,
    ErrorOccurred,
}

impl EventType {
    /// Every known variant, in declaration order.
    pub const ALL: [EventType; 15] = [
        EventType::UserLogin,
        EventType::UserLogout,
        EventType::UserRegistered,
        EventType::AccountCreated,
        EventType::AccountUpdated,
        EventType::AccountDeactivated,
        EventType::PaymentProcessed,
        EventType::BillingAdjusted,
        EventType::RefundIssued,
        EventType::ServiceRequested,
        EventType::ServiceCompleted,
        EventType::ServiceFailed,
        EventType::SystemStart,
        EventType::SystemShutdown,
        EventType::ErrorOccurred,
    ];

    /// The canonical string stored in `audit_log_events.event_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::UserLogin => "USER_LOGIN",
            EventType::UserLogout => "USER_LOGOUT",
            EventType::UserRegistered => "USER_REGISTERED",
            EventType::AccountCreated => "ACCOUNT_CREATED",
            EventType::AccountUpdated => "ACCOUNT_UPDATED",
            EventType::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            EventType::PaymentProcessed => "PAYMENT_PROCESSED",
            EventType::BillingAdjusted => "BILLING_ADJUSTED",
            EventType::RefundIssued => "REFUND_ISSUED",
            EventType::ServiceRequested => "SERVICE_REQUESTED",
            EventType::ServiceCompleted => "SERVICE_COMPLETED",
            EventType::ServiceFailed => "SERVICE_FAILED",
            EventType::SystemStart => "SYSTEM_START",
            EventType::SystemShutdown => "SYSTEM_SHUTDOWN",
            EventType::ErrorOccurred => "ERROR_OCCURRED",
        }
    }

    /// Look up a known event type by exact, case-sensitive match.
    pub fn from_known(value: &str) -> Option<EventType> {
        Self::ALL.iter().copied().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Normalize a submitted event type.
///
/// Known values are replaced with their canonical form; unknown values pass
/// through unchanged.
pub fn canonicalize(value: &str) -> String {
    match EventType::from_known(value) {
        Some(known) => known.as_str().to_string(),
        None => value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
