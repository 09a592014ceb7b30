//! Transaction ledger
//!
//! Append-only store of transaction records. `append` runs on the caller's
//! transaction handle so the ledger row and the balance write-back share one
//! commit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{OperationType, TransactionRecord};

/// Repository for the append-only transaction ledger
#[derive(Debug, Clone)]
pub struct TransactionLedger {
    pool: PgPool,
}

impl TransactionLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a transaction record inside the caller's unit of work.
    ///
    /// Account existence is guaranteed by the caller having loaded (and
    /// locked) the account on the same transaction handle. The amount is
    /// already signed.
    pub async fn append(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account_id: i64,
        operation_type: OperationType,
        signed_amount: Decimal,
        event_date: DateTime<Utc>,
    ) -> Result<TransactionRecord, sqlx::Error> {
        let transaction_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO transactions (account_id, operation_type, amount, event_date)
            VALUES ($1, $2, $3, $4)
            RETURNING transaction_id
            "#,
        )
        .bind(account_id)
        .bind(operation_type.code())
        .bind(signed_amount)
        .bind(event_date)
        .fetch_one(&mut **tx)
        .await?;

        Ok(TransactionRecord {
            transaction_id,
            account_id,
            operation_type,
            amount: signed_amount,
            event_date,
        })
    }

    /// All ledger entries for an account, oldest first.
    pub async fn find_by_account(
        &self,
        account_id: i64,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        let rows: Vec<(i64, i64, i16, Decimal, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT transaction_id, account_id, operation_type, amount, event_date
            FROM transactions
            WHERE account_id = $1
            ORDER BY transaction_id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(transaction_id, account_id, code, amount, event_date)| {
                // a code outside 1-4 cannot be written by this crate
                OperationType::from_code(code)
                    .ok()
                    .map(|operation_type| TransactionRecord {
                        transaction_id,
                        account_id,
                        operation_type,
                        amount,
                        event_date,
                    })
            })
            .collect())
    }
}
