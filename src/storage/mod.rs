//! Storage layer
//!
//! Accounts, categories and ledger records live in memory and are persisted
//! together as one JSON snapshot. A save rewrites the whole file atomically,
//! so a write that touches several records (a transfer) lands entirely or not
//! at all.

pub mod accounts;
pub mod categories;
pub mod file_io;
pub mod transactions;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::{Account, Category, Transaction};

pub(crate) fn poisoned<T>(e: PoisonError<T>) -> FinanceError {
    FinanceError::Storage(format!("Lock poisoned: {}", e))
}

/// On-disk shape of `ledger.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Storage coordinator owning every repository and the audit log
pub struct Storage {
    path: PathBuf,
    audit: AuditLogger,
    /// Serializes commits so one rollback cannot undo another commit's write
    commit_lock: Mutex<()>,
    pub accounts: AccountRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Open the ledger under `paths`, creating directories and loading data
    pub fn open(paths: &FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;
        let storage = Self::new(paths.ledger_file(), paths.audit_log());
        storage.load()?;
        Ok(storage)
    }

    /// Create an empty store bound to a ledger file and an audit log
    pub fn new(ledger_file: PathBuf, audit_log: PathBuf) -> Self {
        Self {
            path: ledger_file,
            audit: AuditLogger::new(audit_log),
            commit_lock: Mutex::new(()),
            accounts: AccountRepository::new(),
            categories: CategoryRepository::new(),
            transactions: TransactionRepository::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load the snapshot from disk (an absent file means an empty ledger)
    pub fn load(&self) -> Result<(), FinanceError> {
        let snapshot: LedgerSnapshot = read_json(&self.path)?;
        self.restore(snapshot)
    }

    /// Write every repository to disk in one atomic write
    pub fn save(&self) -> Result<(), FinanceError> {
        write_json_atomic(&self.path, &self.snapshot()?)
    }

    /// Copy of the current in-memory state
    pub fn snapshot(&self) -> Result<LedgerSnapshot, FinanceError> {
        Ok(LedgerSnapshot {
            accounts: self.accounts.get_all()?,
            categories: self.categories.get_all()?,
            transactions: self.transactions.get_all()?,
        })
    }

    /// Replace the in-memory state with `snapshot`
    pub fn restore(&self, snapshot: LedgerSnapshot) -> Result<(), FinanceError> {
        self.accounts.replace_all(snapshot.accounts)?;
        self.categories.replace_all(snapshot.categories)?;
        self.transactions.replace_all(snapshot.transactions)?;
        Ok(())
    }

    /// Apply `change` to memory and persist it; on any failure memory is
    /// rolled back to what it was before and nothing is written
    ///
    /// Commits run one at a time. `change` must not call `commit` itself.
    pub fn commit<T>(
        &self,
        change: impl FnOnce(&Self) -> Result<T, FinanceError>,
    ) -> Result<T, FinanceError> {
        let _guard = self.commit_lock.lock().map_err(poisoned)?;
        let before = self.snapshot()?;
        let result = change(self).and_then(|value| self.save().map(|()| value));
        if result.is_err() {
            self.restore(before)?;
        }
        result
    }

    /// Append audit entries for a committed write
    pub fn log(&self, entries: &[AuditEntry]) -> Result<(), FinanceError> {
        self.audit.log_batch(entries)
    }
}
