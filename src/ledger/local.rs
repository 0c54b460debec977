//! File-backed ledger and directory service
//!
//! Keeps every user's accounts, categories and records in one snapshot file.
//! Each call is scoped to the session user; records of other users are
//! invisible. Posting an entry adds its signed amount to the account balance,
//! replacing an entry first reverts the old effect, and a transfer writes both
//! legs and both balances in a single atomic save.

use tracing::{info, warn};

use super::{DirectoryService, LedgerService, Session};
use crate::audit::{AuditEntry, EntityType};
use crate::config::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Account, AccountDraft, AccountId, Category, CategoryDraft, CategoryId, CategoryType, EntryId,
    LedgerEntry, Money, Transaction, TransferOperation, TransferReceipt, UserId,
};
use crate::storage::Storage;
use crate::validation::{Field, ValidationErrors};

/// Ledger service over a local [`Storage`]
pub struct LocalLedger {
    storage: Storage,
}

impl LocalLedger {
    /// Open the ledger stored under `paths`
    pub fn open(paths: &FinancePaths) -> FinanceResult<Self> {
        Ok(Self::new(Storage::open(paths)?))
    }

    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    fn authorize<'s>(&self, session: &'s Session) -> FinanceResult<&'s UserId> {
        if session.has_token() {
            Ok(session.user())
        } else {
            Err(FinanceError::Unauthorized(
                "a session token is required".into(),
            ))
        }
    }

    fn require_account(&self, user: &UserId, id: &AccountId) -> FinanceResult<Account> {
        self.storage
            .accounts
            .get(user, id)?
            .ok_or_else(|| FinanceError::account_not_found(id.as_str()))
    }

    fn require_category(&self, user: &UserId, id: &CategoryId) -> FinanceResult<Category> {
        self.storage
            .categories
            .get(user, id)?
            .ok_or_else(|| FinanceError::category_not_found(id.as_str()))
    }

    /// Reject entries the form would never produce
    fn check_entry(&self, user: &UserId, entry: &LedgerEntry) -> FinanceResult<()> {
        let mut errors = ValidationErrors::new();
        if entry.signed_amount().is_zero() {
            errors.add(Field::Amount, "Amount cannot be zero");
        }
        if let Some(category_id) = entry.category_id() {
            let category = self.require_category(user, category_id)?;
            let expected = if entry.signed_amount().is_negative() {
                CategoryType::Expense
            } else {
                CategoryType::Income
            };
            if !entry.signed_amount().is_zero() && category.category_type != expected {
                errors.add(
                    Field::CategoryId,
                    format!(
                        "Category '{}' is {} but the amount is {}",
                        category.name,
                        category.category_type,
                        if expected == CategoryType::Expense {
                            "an outflow"
                        } else {
                            "an inflow"
                        }
                    ),
                );
            }
        }
        errors.into_result(|| ()).map_err(FinanceError::from)
    }

    /// Post `amount` to an account and store it
    fn post(&self, user: &UserId, account_id: &AccountId, amount: Money) -> FinanceResult<()> {
        let mut account = self.require_account(user, account_id)?;
        if account.apply(amount).is_none() {
            let mut errors = ValidationErrors::new();
            errors.add(
                Field::Amount,
                format!("Amount would overflow the balance of '{}'", account.name),
            );
            return Err(errors.into());
        }
        self.storage.accounts.upsert(account)
    }

    /// Audit entries recorded for the session user, oldest first
    ///
    /// With a `limit`, only the most recent `limit` entries are returned.
    pub fn audit_trail(
        &self,
        session: &Session,
        limit: Option<usize>,
    ) -> FinanceResult<Vec<AuditEntry>> {
        let user = self.authorize(session)?;
        let mut entries: Vec<AuditEntry> = self
            .storage
            .audit()
            .read_all()?
            .into_iter()
            .filter(|e| &e.user_id == user)
            .collect();
        if let Some(limit) = limit {
            let skip = entries.len().saturating_sub(limit);
            entries.drain(..skip);
        }
        Ok(entries)
    }

    fn audit(&self, entries: &[AuditEntry]) {
        // The write is already saved; audit failures are only logged.
        if let Err(e) = self.storage.log(entries) {
            warn!(error = %e, "Failed to append audit log");
        }
    }
}

impl LedgerService for LocalLedger {
    fn create_entry(&self, session: &Session, entry: &LedgerEntry) -> FinanceResult<Transaction> {
        let user = self.authorize(session)?;

        let txn = self.storage.commit(|s| {
            self.require_account(user, entry.account_id())?;
            self.check_entry(user, entry)?;

            let txn = Transaction::from_entry(user.clone(), entry);
            self.post(user, &txn.account_id, txn.amount)?;
            s.transactions.upsert(txn.clone())?;
            Ok(txn)
        })?;

        self.audit(&[AuditEntry::create(
            user,
            EntityType::Transaction,
            txn.id.as_str(),
            Some(txn.description.clone()),
            &txn,
        )]);
        info!(user = %user, id = %txn.id, amount = %txn.amount, "Created ledger entry");
        Ok(txn)
    }

    fn update_entry(
        &self,
        session: &Session,
        id: &EntryId,
        entry: &LedgerEntry,
    ) -> FinanceResult<Transaction> {
        let user = self.authorize(session)?;

        let (before, after) = self.storage.commit(|s| {
            let before = s
                .transactions
                .get(user, id)?
                .ok_or_else(|| FinanceError::entry_not_found(id.as_str()))?;
            if before.is_transfer() {
                return Err(FinanceError::TransferEditUnsupported);
            }
            self.require_account(user, entry.account_id())?;
            self.check_entry(user, entry)?;

            self.post(user, &before.account_id, -before.amount)?;
            let mut after = before.clone();
            after.replace_with(entry);
            self.post(user, &after.account_id, after.amount)?;

            s.transactions.upsert(after.clone())?;
            Ok((before, after))
        })?;

        self.audit(&[AuditEntry::update(
            user,
            EntityType::Transaction,
            after.id.as_str(),
            Some(after.description.clone()),
            &before,
            &after,
        )]);
        info!(user = %user, id = %after.id, amount = %after.amount, "Updated ledger entry");
        Ok(after)
    }

    fn create_transfer(
        &self,
        session: &Session,
        transfer: &TransferOperation,
    ) -> FinanceResult<TransferReceipt> {
        let user = self.authorize(session)?;

        let mut errors = ValidationErrors::new();
        if !transfer.amount().is_positive() {
            errors.add(Field::Amount, "Transfer amount must be positive");
        }
        if transfer.from_account_id() == transfer.to_account_id() {
            errors.add(
                Field::ToAccountId,
                "Destination account must differ from source account",
            );
        }
        errors.into_result(|| ())?;

        let receipt = self.storage.commit(|s| {
            self.require_account(user, transfer.from_account_id())?;
            self.require_account(user, transfer.to_account_id())?;

            let mut outflow = Transaction::new(
                user.clone(),
                transfer.from_account_id().clone(),
                transfer.date(),
                -transfer.amount(),
                transfer.description(),
            );
            let mut inflow = Transaction::new(
                user.clone(),
                transfer.to_account_id().clone(),
                transfer.date(),
                transfer.amount(),
                transfer.description(),
            );
            outflow.transfer_pair_id = Some(inflow.id.clone());
            inflow.transfer_pair_id = Some(outflow.id.clone());

            self.post(user, &outflow.account_id, outflow.amount)?;
            self.post(user, &inflow.account_id, inflow.amount)?;
            s.transactions.upsert(outflow.clone())?;
            s.transactions.upsert(inflow.clone())?;

            Ok(TransferReceipt {
                from_transaction: outflow,
                to_transaction: inflow,
            })
        })?;

        self.audit(&[
            AuditEntry::create(
                user,
                EntityType::Transaction,
                receipt.from_transaction.id.as_str(),
                Some(receipt.from_transaction.description.clone()),
                &receipt.from_transaction,
            ),
            AuditEntry::create(
                user,
                EntityType::Transaction,
                receipt.to_transaction.id.as_str(),
                Some(receipt.to_transaction.description.clone()),
                &receipt.to_transaction,
            ),
        ]);
        info!(
            user = %user,
            from = %transfer.from_account_id(),
            to = %transfer.to_account_id(),
            amount = %transfer.amount(),
            "Recorded transfer"
        );
        Ok(receipt)
    }

    fn get_entry(&self, session: &Session, id: &EntryId) -> FinanceResult<Transaction> {
        let user = self.authorize(session)?;
        self.storage
            .transactions
            .get(user, id)?
            .ok_or_else(|| FinanceError::entry_not_found(id.as_str()))
    }

    fn list_entries(&self, session: &Session) -> FinanceResult<Vec<Transaction>> {
        let user = self.authorize(session)?;
        self.storage.transactions.get_for_user(user)
    }
}

impl DirectoryService for LocalLedger {
    fn list_accounts(&self, session: &Session) -> FinanceResult<Vec<Account>> {
        let user = self.authorize(session)?;
        self.storage.accounts.get_for_user(user)
    }

    fn list_categories(&self, session: &Session) -> FinanceResult<Vec<Category>> {
        let user = self.authorize(session)?;
        self.storage.categories.get_for_user(user)
    }

    fn create_account(&self, session: &Session, draft: &AccountDraft) -> FinanceResult<Account> {
        let user = self.authorize(session)?;

        let account = self.storage.commit(|s| {
            if s.accounts.name_exists(user, &draft.name)? {
                return Err(FinanceError::Duplicate {
                    entity_type: "Account",
                    identifier: draft.name.clone(),
                });
            }
            if draft.balance.is_negative() {
                let mut errors = ValidationErrors::new();
                errors.add(Field::Balance, "Balance must be positive");
                return Err(errors.into());
            }

            let account = Account::new(
                user.clone(),
                draft.name.clone(),
                draft.account_type,
                draft.balance,
            );
            s.accounts.upsert(account.clone())?;
            Ok(account)
        })?;

        self.audit(&[AuditEntry::create(
            user,
            EntityType::Account,
            account.id.as_str(),
            Some(account.name.clone()),
            &account,
        )]);
        info!(user = %user, id = %account.id, "Created account");
        Ok(account)
    }

    fn create_category(
        &self,
        session: &Session,
        draft: &CategoryDraft,
    ) -> FinanceResult<Category> {
        let user = self.authorize(session)?;

        let category = self.storage.commit(|s| {
            let category = match &draft.parent_id {
                Some(parent_id) => {
                    self.require_category(user, parent_id)?;
                    Category::with_parent(
                        user.clone(),
                        draft.name.clone(),
                        draft.category_type,
                        parent_id.clone(),
                    )
                }
                None => Category::new(user.clone(), draft.name.clone(), draft.category_type),
            };
            s.categories.upsert(category.clone())?;
            Ok(category)
        })?;

        self.audit(&[AuditEntry::create(
            user,
            EntityType::Category,
            category.id.as_str(),
            Some(category.name.clone()),
            &category,
        )]);
        info!(user = %user, id = %category.id, "Created category");
        Ok(category)
    }
}
