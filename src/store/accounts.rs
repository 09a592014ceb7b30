//! Account store
//!
//! Persistence for account records. Uniqueness of the document number is
//! enforced by the database constraint, not an existence pre-check, so two
//! concurrent creations resolve to exactly one winner.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Account, DomainError};
use crate::error::AppError;

/// Repository for account records
#[derive(Debug, Clone)]
pub struct AccountStore {
    pool: PgPool,
}

impl AccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account with balance 0 and the given credit limit.
    ///
    /// # Errors
    /// `DomainError::DuplicateDocumentNumber` when the document number is
    /// already taken (mapped from the unique-constraint violation).
    pub async fn create(
        &self,
        document_number: &str,
        credit_limit: Decimal,
    ) -> Result<Account, AppError> {
        let account_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO accounts (document_number, balance, credit_limit)
            VALUES ($1, 0, $2)
            RETURNING account_id
            "#,
        )
        .bind(document_number)
        .bind(credit_limit)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Domain(DomainError::DuplicateDocumentNumber(
                    document_number.to_string(),
                ))
            }
            _ => AppError::Database(e),
        })?;

        Ok(Account {
            account_id,
            document_number: document_number.to_string(),
            balance: Decimal::ZERO,
            credit_limit,
        })
    }

    /// Look up an account by id.
    pub async fn find_by_id(&self, account_id: i64) -> Result<Option<Account>, sqlx::Error> {
        let row: Option<(i64, String, Decimal, Decimal)> = sqlx::query_as(
            r#"
            SELECT account_id, document_number, balance, credit_limit
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Self::into_account))
    }

    /// Look up an account by id with a row lock, inside the caller's unit of
    /// work. Concurrent postings against the same account serialize here;
    /// the lock is held until the transaction commits or rolls back.
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account_id: i64,
    ) -> Result<Option<Account>, sqlx::Error> {
        let row: Option<(i64, String, Decimal, Decimal)> = sqlx::query_as(
            r#"
            SELECT account_id, document_number, balance, credit_limit
            FROM accounts
            WHERE account_id = $1
            FOR UPDATE
            "#,
        )
        .bind(account_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(Self::into_account))
    }

    /// Write back a new balance inside the caller's unit of work.
    ///
    /// # Errors
    /// `DomainError::AccountNotFound` if the account no longer exists.
    pub async fn store_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account_id: i64,
        new_balance: Decimal,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET balance = $2
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .bind(new_balance)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Domain(DomainError::AccountNotFound(account_id)));
        }

        Ok(())
    }

    fn into_account(row: (i64, String, Decimal, Decimal)) -> Account {
        let (account_id, document_number, balance, credit_limit) = row;
        Account {
            account_id,
            document_number,
            balance,
            credit_limit,
        }
    }
}
