//! Persisted transaction model
//!
//! What the ledger service returns after accepting an entry or a transfer.
//! Transfer legs point at each other through `transfer_pair_id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry::LedgerEntry;
use super::ids::{AccountId, CategoryId, EntryId, UserId};
use super::money::Money;

/// A persisted ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: EntryId,

    /// Owning user
    pub user_id: UserId,

    /// The account this record belongs to
    pub account_id: AccountId,

    /// Transaction date
    pub date: NaiveDate,

    /// Signed amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Free-text description
    pub description: String,

    /// Category, absent for transfer legs
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// For transfer legs, the id of the opposite leg
    #[serde(default)]
    pub transfer_pair_id: Option<EntryId>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new record
    pub fn new(
        user_id: UserId,
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::generate(),
            user_id,
            account_id,
            date,
            amount,
            description: description.into(),
            category_id: None,
            transfer_pair_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a record from an accepted ledger entry
    pub fn from_entry(user_id: UserId, entry: &LedgerEntry) -> Self {
        let mut txn = Self::new(
            user_id,
            entry.account_id().clone(),
            entry.date(),
            entry.signed_amount(),
            entry.description(),
        );
        txn.category_id = entry.category_id().cloned();
        txn
    }

    /// Replace the entry fields, keeping identity and creation time
    pub fn replace_with(&mut self, entry: &LedgerEntry) {
        self.account_id = entry.account_id().clone();
        self.date = entry.date();
        self.amount = entry.signed_amount();
        self.description = entry.description().to_string();
        self.category_id = entry.category_id().cloned();
        self.updated_at = Utc::now();
    }

    /// Check if this is a transfer leg
    pub fn is_transfer(&self) -> bool {
        self.transfer_pair_id.is_some()
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.description, self.amount)
    }
}
