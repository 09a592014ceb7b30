//! Persistence module
//!
//! Repositories for accounts and the transaction ledger. Methods that must
//! share a unit of work with the caller take an explicit transaction handle
//! instead of the pool.

pub mod accounts;
pub mod transactions;

pub use accounts::AccountStore;
pub use transactions::TransactionLedger;
