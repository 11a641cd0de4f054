//! Handlers for audit event ingestion and retrieval.
//!
//! Every endpoint requires the `X-Client-ID` header. No ownership check is
//! made on reads: any identified caller can fetch any event, including
//! events recorded by other clients.

use audit_trail_core::error::CoreError;
use audit_trail_core::event_type;
use audit_trail_core::types::EventId;
use audit_trail_db::models::audit_event::{AuditLogEvent, CreateAuditLogEvent};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::client_id::ClientId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /event`.
///
/// `event_type` is optional at the serde level so that an absent value is
/// reported as a missing field rather than as malformed JSON.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub event_id: Option<EventId>,
    pub event_type: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<i32>,
    pub entity_json: Option<serde_json::Value>,
}

/// Acknowledgement returned by `POST /event`.
#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    pub message: &'static str,
    pub event_id: EventId,
}

pub const EVENT_CREATED_MESSAGE: &str = "Audit Log Event added successfully.";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.len() > 5 && essence.ends_with("+json"))
}

/// Decode the ingest body, failing with `InvalidPayload` on anything that is
/// not a JSON object with correctly typed fields.
fn parse_create_request(headers: &HeaderMap, body: &[u8]) -> Result<CreateEventRequest, CoreError> {
    if !has_json_content_type(headers) {
        return Err(CoreError::InvalidPayload(
            "Content-Type must be application/json".into(),
        ));
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| CoreError::InvalidPayload(e.to_string()))?;

    if !value.is_object() {
        return Err(CoreError::InvalidPayload(
            "Request body must be a JSON object".into(),
        ));
    }

    serde_json::from_value(value).map_err(|e| CoreError::InvalidPayload(e.to_string()))
}

fn body_rejection(rejection: BytesRejection) -> AppError {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
        _ => CoreError::InvalidPayload(rejection.body_text()).into(),
    }
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

/// POST /event
///
/// Record a new audit event. Checks run in a fixed order: body shape,
/// `event_type` presence, event-type canonicalization, client id, column
/// widths. The header is read by hand rather than through the [`ClientId`]
/// extractor so that body errors take precedence over a missing header.
/// Bodies over the configured limit are rejected with `413`.
pub async fn create_event(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<impl IntoResponse> {
    let body = body.map_err(body_rejection)?;
    let request = parse_create_request(&headers, &body)?;

    let event_type = request
        .event_type
        .filter(|t| !t.is_empty())
        .ok_or_else(CoreError::missing_event_type)?;
    let event_type = event_type::canonicalize(&event_type);

    let client_id = ClientId::from_headers(&headers)?;

    let input = CreateAuditLogEvent {
        event_id: request.event_id,
        event_type,
        client_id: client_id.into_inner(),
        user_id: request.user_id,
        request_method: method.as_str().to_string(),
        status: request.status,
        entity_json: request.entity_json,
    };
    input.check()?;

    let event = state.store.insert(&input).await?;

    tracing::info!(
        event_id = %event.event_id,
        event_type = %event.event_type,
        client_id = %event.client_id,
        "Audit event recorded",
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            message: EVENT_CREATED_MESSAGE,
            event_id: event.event_id,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// GET /event/{event_id}
///
/// Fetch a single event. An id that is not a UUID cannot match any stored
/// event and is reported as not found.
pub async fn get_event(
    client: ClientId,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<AuditLogEvent>> {
    let id = EventId::parse_str(&event_id)
        .map_err(|_| CoreError::event_not_found(&event_id))?;

    let event = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::event_not_found(&event_id))?;

    tracing::debug!(event_id = %event.event_id, client_id = %client.as_str(), "Audit event read");

    Ok(Json(event))
}

/// GET /events
///
/// Return every stored event, unfiltered by client and in store order.
pub async fn list_events(
    client: ClientId,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AuditLogEvent>>> {
    let events = state.store.list_all().await?;

    tracing::debug!(count = events.len(), client_id = %client.as_str(), "Audit events listed");

    Ok(Json(events))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    fn json_headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn accepts_json_content_type_with_charset() {
        assert!(has_json_content_type(&json_headers("application/json; charset=utf-8")));
        assert!(has_json_content_type(&json_headers("application/vnd.audit+json")));
    }

    #[test]
    fn rejects_missing_or_other_content_type() {
        assert!(!has_json_content_type(&HeaderMap::new()));
        assert!(!has_json_content_type(&json_headers("text/plain")));
        assert!(!has_json_content_type(&json_headers("+json")));
    }

    #[test]
    fn parses_full_body() {
        let body = br#"{"event_type":"USER_LOGIN","user_id":"u1","status":200,"entity_json":{"k":"v"}}"#;
        let request = parse_create_request(&json_headers("application/json"), body).unwrap();

        assert_eq!(request.event_type.as_deref(), Some("USER_LOGIN"));
        assert_eq!(request.user_id.as_deref(), Some("u1"));
        assert_eq!(request.status, Some(200));
        assert_eq!(request.entity_json, Some(serde_json::json!({"k": "v"})));
        assert!(request.event_id.is_none());
    }

    #[test]
    fn empty_object_parses_with_no_event_type() {
        let request = parse_create_request(&json_headers("application/json"), b"{}").unwrap();
        assert!(request.event_type.is_none());
    }

    #[test]
    fn malformed_json_is_invalid_payload() {
        assert_matches!(
            parse_create_request(&json_headers("application/json"), b"{not json"),
            Err(CoreError::InvalidPayload(_))
        );
    }

    #[test]
    fn non_object_body_is_invalid_payload() {
        assert_matches!(
            parse_create_request(&json_headers("application/json"), b"[1, 2]"),
            Err(CoreError::InvalidPayload(_))
        );
    }

    #[test]
    fn wrongly_typed_field_is_invalid_payload() {
        assert_matches!(
            parse_create_request(
                &json_headers("application/json"),
                br#"{"event_type":"USER_LOGIN","status":"ok"}"#,
            ),
            Err(CoreError::InvalidPayload(_))
        );
    }
}
