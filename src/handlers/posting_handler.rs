//! Posting engine
//!
//! Posts a transaction against an account: resolves the operation type,
//! computes the signed amount, enforces the available-limit invariant, and
//! persists the balance write-back together with the ledger append as one
//! unit of work.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;

use crate::domain::{Amount, DomainError, OperationType, TransactionRecord};
use crate::error::AppError;
use crate::store::{AccountStore, TransactionLedger};

use super::PostTransactionCommand;

/// Handler for posting transactions
pub struct PostTransactionHandler {
    accounts: AccountStore,
    ledger: TransactionLedger,
    pool: PgPool,
}

impl PostTransactionHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            accounts: AccountStore::new(pool.clone()),
            ledger: TransactionLedger::new(pool.clone()),
            pool,
        }
    }

    /// Execute the post transaction command with retry.
    ///
    /// Serialization failures and deadlocks are transient: the attempt is
    /// rolled back and retried with backoff. Business failures are returned
    /// as-is; in every failure case nothing was committed.
    pub async fn execute(
        &self,
        command: PostTransactionCommand,
    ) -> Result<TransactionRecord, AppError> {
        const MAX_RETRIES: u32 = 3;

        // Resolved up front: an invalid code never opens a transaction.
        let operation = OperationType::from_code(command.operation_type_id)?;

        for attempt in 0..MAX_RETRIES {
            match self
                .try_post(command.account_id, operation, &command.amount)
                .await
            {
                Ok(record) => return Ok(record),
                Err(AppError::Database(e)) if is_serialization_failure(&e) && attempt < MAX_RETRIES - 1 => {
                    let delay = Duration::from_millis(50 * (attempt as u64 + 1));
                    tokio::time::sleep(delay).await;
                    tracing::warn!(
                        account_id = command.account_id,
                        "Serialization failure, retrying (attempt {}/{})",
                        attempt + 1,
                        MAX_RETRIES
                    );
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::Internal(
            "Maximum retries exceeded for posting".to_string(),
        ))
    }

    /// Try to post (single attempt, one unit of work).
    ///
    /// The row lock taken by `find_by_id_for_update` serializes concurrent
    /// postings against the same account; the read, the invariant check, the
    /// balance write-back and the ledger append all happen under it. An early
    /// return drops the transaction, rolling everything back.
    async fn try_post(
        &self,
        account_id: i64,
        operation: OperationType,
        amount: &Amount,
    ) -> Result<TransactionRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let account = self
            .accounts
            .find_by_id_for_update(&mut tx, account_id)
            .await?
            .ok_or(DomainError::AccountNotFound(account_id))?;

        let posting = account.post(operation, amount)?;

        self.accounts
            .store_balance(&mut tx, account.account_id, posting.new_balance)
            .await?;

        let record = self
            .ledger
            .append(
                &mut tx,
                account.account_id,
                operation,
                posting.signed_amount,
                Utc::now(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            transaction_id = record.transaction_id,
            account_id = record.account_id,
            operation_type = record.operation_type.code(),
            "Transaction posted"
        );

        Ok(record)
    }
}

/// PostgreSQL serialization_failure (40001) and deadlock_detected (40P01)
fn is_serialization_failure(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.code().as_deref(), Some("40001") | Some("40P01"))
        }
        _ => false,
    }
}
