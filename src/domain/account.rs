//! Account domain model
//!
//! Holds account state and the posting math: signing the amount, computing
//! the new balance, and enforcing the available-limit invariant. All I/O
//! lives in the stores; this module is pure and fully unit-testable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Amount, DomainError, OperationType};

/// A customer account.
///
/// `balance` is only ever written by the posting engine; every other field
/// is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub document_number: String,
    pub balance: Decimal,
    pub credit_limit: Decimal,
}

/// Outcome of the pure posting check: what to persist if the unit of work
/// commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Amount with the operation type's sign applied
    pub signed_amount: Decimal,
    /// Balance after the posting
    pub new_balance: Decimal,
}

impl Account {
    /// Compute the posting for `operation` of `amount` against this account.
    ///
    /// Invariant enforced: `new_balance + credit_limit >= 0`. Exactly at the
    /// boundary (available limit 0) is allowed.
    ///
    /// # Errors
    /// `DomainError::InsufficientLimit` when the posting would draw the
    /// account below its available limit. No state is touched either way;
    /// the caller persists the returned `Posting` or discards it.
    pub fn post(&self, operation: OperationType, amount: &Amount) -> Result<Posting, DomainError> {
        let signed_amount = operation.signed(amount.value());
        let new_balance = self.balance + signed_amount;
        let available = new_balance + self.credit_limit;

        if available < Decimal::ZERO {
            return Err(DomainError::InsufficientLimit { available });
        }

        Ok(Posting {
            signed_amount,
            new_balance,
        })
    }

    /// Available limit at the current balance.
    pub fn available_limit(&self) -> Decimal {
        self.balance + self.credit_limit
    }
}

/// A row of the append-only transaction ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub account_id: i64,
    pub operation_type: OperationType,
    /// Signed amount: negative for debit operation types, positive for payment
    pub amount: Decimal,
    pub event_date: DateTime<Utc>,
}
