//! Command definitions
//!
//! Commands represent intentions to change the system state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Amount;

/// Command to create a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountCommand {
    /// The customer's 11-digit document number (validated at the transport
    /// layer)
    pub document_number: String,
    /// Credit limit assigned to the account
    pub credit_limit: Decimal,
}

impl CreateAccountCommand {
    pub fn new(document_number: String, credit_limit: Decimal) -> Self {
        Self {
            document_number,
            credit_limit,
        }
    }
}

/// Command to post a transaction against an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTransactionCommand {
    pub account_id: i64,
    /// Raw operation type code; resolved by the posting engine
    pub operation_type_id: i16,
    /// Validated positive amount; the sign comes from the operation type
    pub amount: Amount,
}

impl PostTransactionCommand {
    pub fn new(account_id: i64, operation_type_id: i16, amount: Amount) -> Self {
        Self {
            account_id,
            operation_type_id,
            amount,
        }
    }
}
