//! Category and account lookup
//!
//! Wraps a [`DirectoryService`] for the lifetime of one form. Lists are
//! fetched on first use and kept until the form is dropped or a list is
//! explicitly invalidated. Nothing is shared between forms.

use std::sync::RwLock;

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::ledger::{DirectoryService, Session};
use crate::models::{Account, AccountId, Category, CategoryId, NewCategory, TransactionKind};
use crate::storage::poisoned;
use crate::validation::validate_category;

/// Per-form cache of directory lists
pub struct DirectoryLookup<'a> {
    directory: &'a dyn DirectoryService,
    accounts: RwLock<Option<Vec<Account>>>,
    categories: RwLock<Option<Vec<Category>>>,
}

impl<'a> DirectoryLookup<'a> {
    pub fn new(directory: &'a dyn DirectoryService) -> Self {
        Self {
            directory,
            accounts: RwLock::new(None),
            categories: RwLock::new(None),
        }
    }

    /// The session user's accounts, fetched once
    pub fn accounts(&self, session: &Session) -> FinanceResult<Vec<Account>> {
        if let Some(cached) = self.accounts.read().map_err(poisoned)?.as_ref() {
            return Ok(cached.clone());
        }

        let fetched = self.directory.list_accounts(session)?;
        debug!(count = fetched.len(), "Fetched accounts");
        *self.accounts.write().map_err(poisoned)? = Some(fetched.clone());
        Ok(fetched)
    }

    /// The session user's categories, fetched once
    pub fn categories(&self, session: &Session) -> FinanceResult<Vec<Category>> {
        if let Some(cached) = self.categories.read().map_err(poisoned)?.as_ref() {
            return Ok(cached.clone());
        }

        let fetched = self.directory.list_categories(session)?;
        debug!(count = fetched.len(), "Fetched categories");
        *self.categories.write().map_err(poisoned)? = Some(fetched.clone());
        Ok(fetched)
    }

    /// Drop the cached category list so the next lookup re-fetches it
    pub fn invalidate_categories(&self) -> FinanceResult<()> {
        *self.categories.write().map_err(poisoned)? = None;
        Ok(())
    }

    /// Categories a transaction of `kind` may use
    ///
    /// Only categories whose type matches the kind are offered; a transfer
    /// takes no category at all.
    pub fn category_options(
        &self,
        session: &Session,
        kind: TransactionKind,
    ) -> FinanceResult<Vec<Category>> {
        if !kind.uses_category() {
            return Ok(Vec::new());
        }
        let mut categories = self.categories(session)?;
        categories.retain(|c| c.category_type.accepts(kind));
        Ok(categories)
    }

    /// Accounts that can receive a transfer from `source`
    pub fn destination_options(
        &self,
        session: &Session,
        source: Option<&AccountId>,
    ) -> FinanceResult<Vec<Account>> {
        let mut accounts = self.accounts(session)?;
        if let Some(source) = source {
            accounts.retain(|a| &a.id != source);
        }
        Ok(accounts)
    }

    /// Resolve a selection typed as an id or a name (case-insensitive)
    pub fn resolve_account(&self, session: &Session, input: &str) -> FinanceResult<AccountId> {
        let input = input.trim();
        let accounts = self.accounts(session)?;

        accounts
            .iter()
            .find(|a| a.id.as_str() == input)
            .or_else(|| accounts.iter().find(|a| a.name.eq_ignore_ascii_case(input)))
            .map(|a| a.id.clone())
            .ok_or_else(|| FinanceError::account_not_found(input))
    }

    /// Resolve a category typed as an id or a name
    ///
    /// Names are matched case-insensitively. When `kind` is given and several
    /// categories share the name, the one whose type fits the kind wins.
    pub fn resolve_category(
        &self,
        session: &Session,
        input: &str,
        kind: Option<TransactionKind>,
    ) -> FinanceResult<CategoryId> {
        let input = input.trim();
        let categories = self.categories(session)?;

        if let Some(by_id) = categories.iter().find(|c| c.id.as_str() == input) {
            return Ok(by_id.id.clone());
        }

        let named: Vec<&Category> = categories
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(input))
            .collect();
        named
            .iter()
            .find(|c| kind.is_some_and(|k| c.category_type.accepts(k)))
            .or_else(|| named.first())
            .map(|c| c.id.clone())
            .ok_or_else(|| FinanceError::category_not_found(input))
    }

    /// Create a category from inside a form and refresh the cached list
    ///
    /// The parent, if any, is checked against the current list.
    pub fn create_category(
        &self,
        session: &Session,
        form: &NewCategory,
    ) -> FinanceResult<Category> {
        let existing = self.categories(session)?;
        let draft = validate_category(form, Some(&existing))?;

        let created = self.directory.create_category(session, &draft)?;
        self.invalidate_categories()?;
        Ok(created)
    }
}
