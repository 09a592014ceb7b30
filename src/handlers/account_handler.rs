//! Account creation handler

use sqlx::PgPool;

use crate::domain::Account;
use crate::error::AppError;
use crate::store::AccountStore;

use super::CreateAccountCommand;

/// Handler for account creation
pub struct CreateAccountHandler {
    accounts: AccountStore,
}

impl CreateAccountHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            accounts: AccountStore::new(pool),
        }
    }

    /// Execute the create account command.
    ///
    /// Uniqueness of the document number is left to the store's database
    /// constraint; of two concurrent creations with the same document
    /// number exactly one reaches here successfully.
    pub async fn execute(&self, command: CreateAccountCommand) -> Result<Account, AppError> {
        let account = self
            .accounts
            .create(&command.document_number, command.credit_limit)
            .await?;

        tracing::info!(
            account_id = account.account_id,
            "Account created"
        );

        Ok(account)
    }
}
