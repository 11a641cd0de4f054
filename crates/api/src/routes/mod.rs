pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the audit event route tree.
///
/// Route hierarchy:
///
/// ```text
/// /event                 POST   record an event
/// /event/{event_id}      GET    fetch one event
/// /events                GET    list every event
/// ```
///
/// `/health` is mounted separately by [`health::router`].
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(events::router())
}
