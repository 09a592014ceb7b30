//! API integration tests
//!
//! Drive the real router against the database configured by DATABASE_URL.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use banking_api::api::{
    self,
    routes::{CreateAccountRequest, CreateTransactionRequest},
    AppState,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use sqlx::PgPool;
use tower::util::ServiceExt;

mod common;

fn test_app(pool: PgPool) -> Router {
    api::create_router().with_state(AppState {
        pool,
        default_credit_limit: dec!(1000.00),
    })
}

async fn create_account(app: &Router, document_number: &str) -> (StatusCode, Value, Option<String>) {
    let req = Request::builder()
        .method("POST")
        .uri("/accounts")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&CreateAccountRequest {
                document_number: document_number.to_string(),
            })
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json, location)
}

async fn post_transaction(
    app: &Router,
    account_id: i64,
    operation_type_id: i16,
    amount: Decimal,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/transactions")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&CreateTransactionRequest {
                account_id,
                operation_type_id,
                amount,
            })
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}

async fn account_balance(pool: &PgPool, account_id: i64) -> Decimal {
    sqlx::query_scalar("SELECT balance FROM accounts WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_account_lifecycle() {
    let _guard = common::db_guard().await;
    let pool = common::setup_test_db().await;
    let app = test_app(pool.clone());

    // Create
    let (status, json, location) = create_account(&app, "12345678900").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["document_number"], "12345678900");
    let account_id = json["account_id"].as_i64().unwrap();
    assert_eq!(location.unwrap(), format!("/accounts/{}", account_id));

    // Fetch it back
    let req = Request::builder()
        .method("GET")
        .uri(format!("/accounts/{}", account_id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["account_id"].as_i64().unwrap(), account_id);
    assert_eq!(json["document_number"], "12345678900");

    // New accounts start at balance 0
    assert_eq!(account_balance(&pool, account_id).await, Decimal::ZERO);

    // Duplicate document number
    let (status, json, _) = create_account(&app, "12345678900").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["status"], 409);
    assert_eq!(json["error"], "Conflict");
    assert_eq!(
        json["message"],
        "Account with document number 12345678900 already exists"
    );
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_get_unknown_account() {
    let _guard = common::db_guard().await;
    let pool = common::setup_test_db().await;
    let app = test_app(pool);

    let req = Request::builder()
        .method("GET")
        .uri("/accounts/999999")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], "Not Found");
    assert_eq!(json["message"], "Account with id 999999 not found");
}

#[tokio::test]
async fn test_create_account_validation() {
    let _guard = common::db_guard().await;
    let pool = common::setup_test_db().await;
    let app = test_app(pool);

    for document_number in ["123456789", "123456789001", "12345abc900", ""] {
        let (status, json, _) = create_account(&app, document_number).await;
        assert_eq!(
            status,
            StatusCode::BAD_REQUEST,
            "document number {:?} should be rejected",
            document_number
        );
        assert_eq!(json["status"], 400);
        assert_eq!(json["error"], "Bad Request");
    }
}

#[tokio::test]
async fn test_payment_then_rejected_purchase() {
    let _guard = common::db_guard().await;
    let pool = common::setup_test_db().await;
    let app = test_app(pool.clone());

    let (_, json, _) = create_account(&app, "11122233344").await;
    let account_id = json["account_id"].as_i64().unwrap();

    // Payment of 123.45 credits the balance
    let (status, json) = post_transaction(&app, account_id, 4, dec!(123.45)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["account_id"].as_i64().unwrap(), account_id);
    assert_eq!(json["operation_type_id"], 4);
    assert_eq!(json["amount"], "123.45");
    assert!(json["transaction_id"].as_i64().is_some());
    assert_eq!(account_balance(&pool, account_id).await, dec!(123.45));

    // A 1200.00 purchase would leave available = -76.55
    let (status, json) = post_transaction(&app, account_id, 1, dec!(1200.00)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert_eq!(
        json["message"],
        "Insufficient limit: available limit would drop to -76.55"
    );

    // Balance untouched, no ledger row added
    assert_eq!(account_balance(&pool, account_id).await, dec!(123.45));
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_withdrawal_exactly_at_limit() {
    let _guard = common::db_guard().await;
    let pool = common::setup_test_db().await;
    let app = test_app(pool.clone());

    let (_, json, _) = create_account(&app, "55566677788").await;
    let account_id = json["account_id"].as_i64().unwrap();

    // available = -1000.00 + 1000.00 = 0, which is allowed
    let (status, json) = post_transaction(&app, account_id, 3, dec!(1000.00)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["operation_type_id"], 3);
    assert_eq!(json["amount"], "-1000.00");
    assert_eq!(account_balance(&pool, account_id).await, dec!(-1000.00));
}

#[tokio::test]
async fn test_transaction_request_validation() {
    let _guard = common::db_guard().await;
    let pool = common::setup_test_db().await;
    let app = test_app(pool.clone());

    let (_, json, _) = create_account(&app, "99988877766").await;
    let account_id = json["account_id"].as_i64().unwrap();

    // Unknown account
    let (status, json) = post_transaction(&app, 999999, 1, dec!(10.00)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Account with id 999999 not found");

    // Operation type outside 1-4
    for code in [0, 5, 99] {
        let (status, json) = post_transaction(&app, account_id, code, dec!(10.00)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            format!("Operation type id {} is invalid", code)
        );
    }

    // Invalid amounts: zero, negative, more than 2 fractional digits
    for amount in [dec!(0), dec!(-10.00), dec!(0.125)] {
        let (status, json) = post_transaction(&app, account_id, 1, amount).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {} should be rejected", amount);
        assert!(json["message"].as_str().unwrap().starts_with("Validation failed: amount:"));
    }

    // Nothing was posted
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}
