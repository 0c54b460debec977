//! In-memory ledger record repository

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{AccountId, EntryId, Transaction, UserId};

use super::poisoned;

/// Persisted ledger records of every user, keyed by id
#[derive(Default)]
pub struct TransactionRepository {
    data: RwLock<HashMap<EntryId, Transaction>>,
}

/// Newest first; ties broken by creation time
fn newest_first(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}

impl TransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&self, transactions: Vec<Transaction>) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.clear();
        data.extend(transactions.into_iter().map(|t| (t.id.clone(), t)));
        Ok(())
    }

    pub fn get_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Records owned by `user`, newest first
    pub fn get_for_user(&self, user: &UserId) -> Result<Vec<Transaction>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut transactions: Vec<_> = data
            .values()
            .filter(|t| &t.user_id == user)
            .cloned()
            .collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Records of `user` on one account, newest first
    pub fn get_by_account(
        &self,
        user: &UserId,
        account_id: &AccountId,
    ) -> Result<Vec<Transaction>, FinanceError> {
        let mut transactions = self.get_for_user(user)?;
        transactions.retain(|t| &t.account_id == account_id);
        Ok(transactions)
    }

    pub fn get(&self, user: &UserId, id: &EntryId) -> Result<Option<Transaction>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.get(id).filter(|t| &t.user_id == user).cloned())
    }

    pub fn upsert(&self, txn: Transaction) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.insert(txn.id.clone(), txn);
        Ok(())
    }
}
