//! Account service
//!
//! Validates the account form against the user's existing accounts and hands
//! accepted drafts to the directory.

use tracing::{info, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::ledger::{DirectoryService, Session};
use crate::models::{Account, NewAccount};
use crate::validation::validate_account;

/// Message shown when the directory fails to create an account
pub const ACCOUNT_CREATE_FAILED: &str = "Failed to create account. Please try again.";

/// Service for account management
pub struct AccountService<'a> {
    directory: &'a dyn DirectoryService,
}

impl<'a> AccountService<'a> {
    pub fn new(directory: &'a dyn DirectoryService) -> Self {
        Self { directory }
    }

    /// Validate and create an account
    pub fn create(&self, session: &Session, form: &NewAccount) -> FinanceResult<Account> {
        let existing = self.directory.list_accounts(session)?;
        let draft = validate_account(form, Some(&existing))?;

        let account = self
            .directory
            .create_account(session, &draft)
            .map_err(|e| {
                warn!(error = %e, "Account creation failed");
                FinanceError::submission(ACCOUNT_CREATE_FAILED, e)
            })?;

        info!(account = %account.name, "Account created");
        Ok(account)
    }

    /// The session user's accounts, sorted by name
    pub fn list(&self, session: &Session) -> FinanceResult<Vec<Account>> {
        self.directory.list_accounts(session)
    }
}
