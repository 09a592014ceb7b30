//! Domain error types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Business rule violations and domain invariant failures.
///
/// These are independent of the web/persistence layers; the transport layer
/// maps them to HTTP statuses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An account with this document number already exists
    #[error("Account with document number {0} already exists")]
    DuplicateDocumentNumber(String),

    /// No account exists for the given id
    #[error("Account with id {0} not found")]
    AccountNotFound(i64),

    /// Operation type code outside the closed set 1-4
    #[error("Operation type id {0} is invalid")]
    InvalidOperationType(i16),

    /// Posting would draw the account below its available limit
    #[error("Insufficient limit: available limit would drop to {available}")]
    InsufficientLimit { available: Decimal },
}

impl DomainError {
    /// Check if this is a client error (the request itself is at fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateDocumentNumber(_)
                | Self::AccountNotFound(_)
                | Self::InvalidOperationType(_)
                | Self::InsufficientLimit { .. }
        )
    }
}
