//! Integration tests for the Postgres-backed audit event store.
//!
//! Each test gets a fresh database from `#[sqlx::test]`, so `DATABASE_URL`
//! must point at a reachable PostgreSQL instance.

use assert_matches::assert_matches;
use audit_trail_core::types::EventId;
use audit_trail_db::models::audit_event::CreateAuditLogEvent;
use audit_trail_db::repositories::AuditEventRepo;
use audit_trail_db::store::{AuditEventStore, PgAuditEventStore, StoreError};
use chrono::SubsecRound;
use sqlx::PgPool;

fn new_event(event_type: &str) -> CreateAuditLogEvent {
    CreateAuditLogEvent {
        event_id: None,
        event_type: event_type.to_string(),
        client_id: "client123".to_string(),
        user_id: Some("user456".to_string()),
        request_method: "POST".to_string(),
        status: Some(200),
        entity_json: Some(serde_json::json!({"key": "value"})),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_then_find_round_trips_all_fields(pool: PgPool) {
    let store = PgAuditEventStore::new(pool);
    // Postgres keeps microsecond precision.
    let before = chrono::Utc::now().trunc_subsecs(6);

    let stored = store.insert(&new_event("USER_LOGIN")).await.unwrap();
    assert!(stored.created_at >= before);

    let found = store.find_by_id(stored.event_id).await.unwrap().unwrap();
    assert_eq!(found, stored);
    assert_eq!(found.entity_json, Some(serde_json::json!({"key": "value"})));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_event_id_maps_to_duplicate_error(pool: PgPool) {
    let store = PgAuditEventStore::new(pool.clone());
    let mut input = new_event("SYSTEM_START");
    input.event_id = Some(EventId::new_v4());

    store.insert(&input).await.unwrap();
    let err = store.insert(&input).await.unwrap_err();
    assert_matches!(err, StoreError::DuplicateEventId(_));

    let all = AuditEventRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_insert_leaves_no_row(pool: PgPool) {
    let store = PgAuditEventStore::new(pool.clone());
    // Bypasses DTO validation so the VARCHAR(10) column rejects it.
    let mut input = new_event("USER_LOGIN");
    input.request_method = "X".repeat(11);

    let err = store.insert(&input).await.unwrap_err();
    assert_matches!(err, StoreError::Database(_));

    let all = AuditEventRepo::list_all(&pool).await.unwrap();
    assert!(all.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_all_returns_each_event_once(pool: PgPool) {
    let store = PgAuditEventStore::new(pool);
    let mut ids = Vec::new();
    for event_type in ["USER_LOGIN", "CUSTOM_FOO", "REFUND_ISSUED"] {
        ids.push(store.insert(&new_event(event_type)).await.unwrap().event_id);
    }

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 3);
    for id in ids {
        assert_eq!(all.iter().filter(|e| e.event_id == id).count(), 1);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_passes(pool: PgPool) {
    audit_trail_db::health_check(&pool).await.unwrap();
    assert!(PgAuditEventStore::new(pool).health_check().await.is_ok());
}
