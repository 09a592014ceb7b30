//! Operation types
//!
//! Closed set of transaction categories. Each type carries a fixed integer
//! code (the value stored on transaction rows) and determines whether the
//! transaction is recorded as a debit (negative amount) or a credit
//! (positive amount).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// The four supported operation types.
///
/// Codes 1-3 are debits, code 4 (payment) is the only credit. The mapping is
/// fixed; there is no operation-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    /// Standard purchase. Code 1, debit.
    Purchase,
    /// Installment purchase. Code 2, debit.
    InstallmentPurchase,
    /// Cash withdrawal. Code 3, debit.
    Withdrawal,
    /// Payment into the account. Code 4, credit.
    Payment,
}

impl OperationType {
    /// The integer code stored on transaction rows.
    pub const fn code(self) -> i16 {
        match self {
            OperationType::Purchase => 1,
            OperationType::InstallmentPurchase => 2,
            OperationType::Withdrawal => 3,
            OperationType::Payment => 4,
        }
    }

    /// Resolve an operation type from its integer code.
    ///
    /// # Errors
    /// `DomainError::InvalidOperationType` for any code outside 1-4.
    pub fn from_code(code: i16) -> Result<Self, DomainError> {
        match code {
            1 => Ok(OperationType::Purchase),
            2 => Ok(OperationType::InstallmentPurchase),
            3 => Ok(OperationType::Withdrawal),
            4 => Ok(OperationType::Payment),
            other => Err(DomainError::InvalidOperationType(other)),
        }
    }

    /// Whether this operation type debits the account.
    pub const fn is_debit(self) -> bool {
        !matches!(self, OperationType::Payment)
    }

    /// Apply this type's sign to a positive amount.
    pub fn signed(self, amount: Decimal) -> Decimal {
        if self.is_debit() {
            -amount
        } else {
            amount
        }
    }
}
