//! Command handlers module
//!
//! Handlers orchestrate the write operations: account creation and
//! transaction posting.

mod account_handler;
mod commands;
mod posting_handler;

pub use account_handler::CreateAccountHandler;
pub use commands::*;
pub use posting_handler::PostTransactionHandler;
