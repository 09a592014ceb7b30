//! banking_api library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod store;

pub use config::Config;
pub use domain::{Account, Amount, AmountError, DomainError, OperationType, TransactionRecord};
pub use error::{AppError, AppResult};
