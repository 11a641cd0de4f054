//! Route definitions for audit event ingestion and retrieval.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Audit event routes, mounted at the root.
///
/// ```text
/// POST /event               -> create_event
/// GET  /event/{event_id}    -> get_event
/// GET  /events              -> list_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/event", post(events::create_event))
        .route("/event/{event_id}", get(events::get_event))
        .route("/events", get(events::list_events))
}
