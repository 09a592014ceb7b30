//! API routes
//!
//! HTTP endpoint definitions and request/response types.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::{Amount, DomainError};
use crate::error::AppError;
use crate::handlers::{
    CreateAccountCommand, CreateAccountHandler, PostTransactionCommand, PostTransactionHandler,
};
use crate::store::AccountStore;

/// Shared router state
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Credit limit assigned to newly created accounts
    pub default_credit_limit: Decimal,
}

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub document_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account_id: i64,
    pub document_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: i64,
    pub operation_type_id: i16,
    /// Always positive; the operation type determines the stored sign
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub transaction_id: i64,
    pub account_id: i64,
    pub operation_type_id: i16,
    /// Signed amount as stored in the ledger
    pub amount: Decimal,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/:account_id", get(get_account))
        .route("/transactions", post(create_transaction))
}

// =========================================================================
// POST /accounts
// =========================================================================

/// Create a new account
async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<AccountResponse>), AppError> {
    validate_document_number(&request.document_number)?;

    let handler = CreateAccountHandler::new(state.pool);
    let command = CreateAccountCommand::new(request.document_number, state.default_credit_limit);

    let account = handler.execute(command).await?;
    let location = format!("/accounts/{}", account.account_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AccountResponse {
            account_id: account.account_id,
            document_number: account.document_number,
        }),
    ))
}

// =========================================================================
// GET /accounts/:account_id
// =========================================================================

/// Get account by id
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<AccountResponse>, AppError> {
    let store = AccountStore::new(state.pool);

    let account = store
        .find_by_id(account_id)
        .await?
        .ok_or(DomainError::AccountNotFound(account_id))?;

    Ok(Json(AccountResponse {
        account_id: account.account_id,
        document_number: account.document_number,
    }))
}

// =========================================================================
// POST /transactions
// =========================================================================

/// Post a transaction against an account
async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let amount = Amount::new(request.amount)
        .map_err(|e| AppError::InvalidRequest(format!("amount: {e}")))?;

    let handler = PostTransactionHandler::new(state.pool);
    let command =
        PostTransactionCommand::new(request.account_id, request.operation_type_id, amount);

    let record = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse {
            transaction_id: record.transaction_id,
            account_id: record.account_id,
            operation_type_id: record.operation_type.code(),
            amount: record.amount,
        }),
    ))
}

/// Document numbers are exactly 11 ASCII digits.
fn validate_document_number(document_number: &str) -> Result<(), AppError> {
    if document_number.len() != 11 || !document_number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidRequest(
            "document_number: must be an 11 digit numeric string".to_string(),
        ));
    }
    Ok(())
}
