//! Test utilities and fixtures for payhook integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde_json::{json, Value};
use tower::ServiceExt;

pub use payhook::db::{init_db, queries, AppState, DbPool};
pub use payhook::handlers;
pub use payhook::models::*;

/// Create a pool backed by a single shared in-memory database.
/// max_size 1 keeps every checkout on the same connection, so all requests
/// and assertions see one database.
pub fn setup_test_pool() -> DbPool {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("Failed to build test pool");
    init_db(&pool.get().expect("Failed to get test connection"))
        .expect("Failed to initialize schema");
    pool
}

/// Build the webhook router over a fresh in-memory store.
pub fn webhook_app() -> (Router, AppState) {
    let state = AppState {
        db: setup_test_pool(),
    };
    let app = handlers::webhooks::router().with_state(state.clone());
    (app, state)
}

/// POST a JSON envelope to /webhook and return the status and parsed body.
pub async fn post_webhook(app: Router, body: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).expect("response body should be JSON");
    (status, body)
}

/// A complete, valid PAYMENT_SUCCESS_WEBHOOK envelope.
pub fn payment_success_envelope(order_id: &str, transaction_id: &str, status: &str) -> Value {
    json!({
        "type": "PAYMENT_SUCCESS_WEBHOOK",
        "data": {
            "order": { "order_id": order_id, "order_amount": 250.0 },
            "payment": {
                "cf_payment_id": transaction_id,
                "payment_status": status,
                "bank_reference": "utr_000111",
                "payment_amount": 250.0
            },
            "customer_details": {
                "customer_name": "Asha Rao",
                "customer_email": "asha@example.com",
                "customer_phone": "9876543210"
            }
        }
    })
}

/// The registration ping the gateway sends when a webhook URL is configured.
pub fn registration_ping() -> Value {
    json!({
        "type": "WEBHOOK",
        "data": { "test_object": { "test_key": "test_value" } }
    })
}

/// Insert an order the way the ordering app would, before payment lands.
pub fn insert_existing_order(state: &AppState, order_id: &str) {
    let conn = state.db.get().unwrap();
    conn.execute(
        "INSERT INTO orders (order_id, status, payment_status, created_on, user_id,
                             amount, general_menu, extra_menu)
         VALUES (?1, 'pending', 'PENDING', 1700000000, 'user_7', 250.0,
                 '{\"idli\":2}', 'nil')",
        rusqlite::params![order_id],
    )
    .expect("Failed to insert order fixture");
}

pub fn count_transactions(state: &AppState) -> i64 {
    let conn = state.db.get().unwrap();
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
        .unwrap()
}

pub fn count_orders(state: &AppState) -> i64 {
    let conn = state.db.get().unwrap();
    conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
        .unwrap()
}

pub fn get_order(state: &AppState, order_id: &str) -> Option<OrderRecord> {
    let conn = state.db.get().unwrap();
    queries::get_order(&conn, order_id).unwrap()
}

pub fn get_transaction(state: &AppState, transaction_id: &str) -> Option<TransactionRecord> {
    let conn = state.db.get().unwrap();
    queries::get_transaction(&conn, transaction_id).unwrap()
}
