//! In-memory account repository

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Account, AccountId, UserId};

use super::poisoned;

/// Accounts of every user, keyed by id
#[derive(Default)]
pub struct AccountRepository {
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole contents (used when loading a snapshot)
    pub fn replace_all(&self, accounts: Vec<Account>) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.clear();
        data.extend(accounts.into_iter().map(|a| (a.id.clone(), a)));
        Ok(())
    }

    /// Every account, sorted by id for stable snapshots
    pub fn get_all(&self) -> Result<Vec<Account>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    /// Accounts owned by `user`, sorted by name
    pub fn get_for_user(&self, user: &UserId) -> Result<Vec<Account>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut accounts: Vec<_> = data
            .values()
            .filter(|a| &a.user_id == user)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(accounts)
    }

    /// An account by id, only if `user` owns it
    pub fn get(&self, user: &UserId, id: &AccountId) -> Result<Option<Account>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.get(id).filter(|a| &a.user_id == user).cloned())
    }

    pub fn upsert(&self, account: Account) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.insert(account.id.clone(), account);
        Ok(())
    }

    /// Whether `user` already has an account with this name (case-insensitive)
    pub fn name_exists(&self, user: &UserId, name: &str) -> Result<bool, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .any(|a| &a.user_id == user && a.name.to_lowercase() == name_lower))
    }
}
