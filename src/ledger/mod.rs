//! Ledger and directory collaborators
//!
//! The form logic never persists anything itself. It hands requests to a
//! [`LedgerService`] (entries and transfers) and reads selection lists from a
//! [`DirectoryService`] (accounts and categories). Both take an explicit
//! [`Session`] on every call.
//!
//! [`LocalLedger`] implements both traits over a JSON snapshot on disk so the
//! command line tool works without a remote service.

pub mod local;
pub mod session;

pub use local::LocalLedger;
pub use session::Session;

use crate::error::FinanceResult;
use crate::models::{
    Account, AccountDraft, Category, CategoryDraft, EntryId, LedgerEntry, Transaction,
    TransferOperation, TransferReceipt,
};

/// Persists ledger entries and transfers
pub trait LedgerService: Send + Sync {
    /// Insert a new entry and return the persisted record
    fn create_entry(&self, session: &Session, entry: &LedgerEntry) -> FinanceResult<Transaction>;

    /// Replace an existing entry and return the persisted record
    fn update_entry(
        &self,
        session: &Session,
        id: &EntryId,
        entry: &LedgerEntry,
    ) -> FinanceResult<Transaction>;

    /// Apply both legs of a transfer
    fn create_transfer(
        &self,
        session: &Session,
        transfer: &TransferOperation,
    ) -> FinanceResult<TransferReceipt>;

    /// Fetch one persisted record
    fn get_entry(&self, session: &Session, id: &EntryId) -> FinanceResult<Transaction>;

    /// All records of the session user, newest first
    fn list_entries(&self, session: &Session) -> FinanceResult<Vec<Transaction>>;
}

/// Lists and creates the accounts and categories used by the forms
pub trait DirectoryService: Send + Sync {
    fn list_accounts(&self, session: &Session) -> FinanceResult<Vec<Account>>;

    fn list_categories(&self, session: &Session) -> FinanceResult<Vec<Category>>;

    fn create_account(&self, session: &Session, draft: &AccountDraft) -> FinanceResult<Account>;

    fn create_category(&self, session: &Session, draft: &CategoryDraft)
        -> FinanceResult<Category>;
}
