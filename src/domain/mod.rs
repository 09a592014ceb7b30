//! Domain module
//!
//! Core domain types and business logic.

pub mod account;
pub mod amount;
pub mod error;
pub mod operation;

pub use account::{Account, Posting, TransactionRecord};
pub use amount::{Amount, AmountError};
pub use error::DomainError;
pub use operation::OperationType;
