//! Transaction intents
//!
//! A [`RawIntent`] holds the transaction form exactly as the user filled it in.
//! Validation turns it into a [`TransactionIntent`], whose shape guarantees the
//! invariants the rest of the pipeline relies on: the amount is positive, and
//! the target is a category for income/expense and a destination account for
//! transfers, never both.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{AccountId, CategoryId};
use super::money::Money;
use super::transaction::Transaction;
use crate::error::{FinanceError, FinanceResult};

/// The three kinds of money movement a transaction form can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
    Transfer,
}

impl TransactionKind {
    /// Parse a kind from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }

    /// The wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Transfer => "TRANSFER",
        }
    }

    /// Whether this kind is classified by a category
    pub fn uses_category(&self) -> bool {
        !matches!(self, Self::Transfer)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown transaction kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction kind '{0}' (expected income, expense or transfer)")]
pub struct UnknownKindError(pub String);

impl FromStr for TransactionKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownKindError(s.to_string()))
    }
}

/// The transaction form as entered, before any validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIntent {
    pub kind: TransactionKind,
    pub description: String,
    /// Amount as typed; may carry a sign, which is discarded
    pub amount: String,
    /// Date as `YYYY-MM-DD`
    pub date: Option<String>,
    /// Source account for transfers, the only account otherwise
    pub account_id: Option<String>,
    /// Destination account, transfers only
    pub to_account_id: Option<String>,
    /// Category, income and expense only
    pub category_id: Option<String>,
}

impl RawIntent {
    /// An empty form for `kind`
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date.format("%Y-%m-%d").to_string());
        self
    }

    pub fn account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn to_account(mut self, account_id: impl Into<String>) -> Self {
        self.to_account_id = Some(account_id.into());
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Prefill the form from a persisted entry for editing
    ///
    /// The kind is recovered from the sign of the stored amount and the amount
    /// is shown as its absolute value. Transfer legs cannot be edited.
    pub fn from_transaction(txn: &Transaction) -> FinanceResult<Self> {
        if txn.is_transfer() {
            return Err(FinanceError::TransferEditUnsupported);
        }

        let kind = if txn.amount.is_negative() {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        };
        let amount = txn.amount.abs();

        Ok(Self {
            kind,
            description: txn.description.clone(),
            amount: format!("{}.{:02}", amount.units(), amount.cents_part()),
            date: Some(txn.date.format("%Y-%m-%d").to_string()),
            account_id: Some(txn.account_id.to_string()),
            to_account_id: None,
            category_id: txn.category_id.as_ref().map(ToString::to_string),
        })
    }
}

/// Where a validated intent sends its money
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentTarget {
    /// Income classified by a category of type INCOME
    Income(CategoryId),
    /// Expense classified by a category of type EXPENSE
    Expense(CategoryId),
    /// Transfer into another account
    Transfer(AccountId),
}

/// A validated, normalized transaction intent
///
/// Only the validation rules construct this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    description: String,
    amount: Money,
    date: NaiveDate,
    account_id: AccountId,
    target: IntentTarget,
}

impl TransactionIntent {
    pub(crate) fn new(
        description: String,
        amount: Money,
        date: NaiveDate,
        account_id: AccountId,
        target: IntentTarget,
    ) -> Self {
        debug_assert!(amount.is_positive());
        Self {
            description,
            amount,
            date,
            account_id,
            target,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self.target {
            IntentTarget::Income(_) => TransactionKind::Income,
            IntentTarget::Expense(_) => TransactionKind::Expense,
            IntentTarget::Transfer(_) => TransactionKind::Transfer,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Always positive
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The account the money leaves (transfer, expense) or enters (income)
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn target(&self) -> &IntentTarget {
        &self.target
    }

    pub fn category_id(&self) -> Option<&CategoryId> {
        match &self.target {
            IntentTarget::Income(id) | IntentTarget::Expense(id) => Some(id),
            IntentTarget::Transfer(_) => None,
        }
    }

    pub fn destination_account_id(&self) -> Option<&AccountId> {
        match &self.target {
            IntentTarget::Transfer(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_kind_defaults_to_expense() {
        assert_eq!(RawIntent::default().kind, TransactionKind::Expense);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Transfer".parse::<TransactionKind>(), Ok(TransactionKind::Transfer));
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_builder() {
        let raw = RawIntent::new(TransactionKind::Income)
            .description("Salary")
            .amount("2500")
            .date(date(2026, 10, 1))
            .account("acc1")
            .category("cat1");

        assert_eq!(raw.date.as_deref(), Some("2026-10-01"));
        assert_eq!(raw.account_id.as_deref(), Some("acc1"));
        assert_eq!(raw.to_account_id, None);
    }

    #[test]
    fn test_intent_target_accessors() {
        let intent = TransactionIntent::new(
            "Savings".into(),
            Money::from_cents(100),
            date(2026, 1, 1),
            AccountId::new("acc1"),
            IntentTarget::Transfer(AccountId::new("acc2")),
        );
        assert_eq!(intent.kind(), TransactionKind::Transfer);
        assert_eq!(intent.category_id(), None);
        assert_eq!(intent.destination_account_id(), Some(&AccountId::new("acc2")));
    }

    #[test]
    fn test_from_transaction_recovers_kind_and_magnitude() {
        let mut txn = Transaction::new(
            UserId::new("u1"),
            AccountId::new("acc1"),
            date(2026, 3, 4),
            Money::from_cents(-4250),
            "Groceries",
        );
        txn.category_id = Some(CategoryId::new("cat1"));

        let raw = RawIntent::from_transaction(&txn).unwrap();
        assert_eq!(raw.kind, TransactionKind::Expense);
        assert_eq!(raw.amount, "42.50");
        assert_eq!(raw.date.as_deref(), Some("2026-03-04"));
        assert_eq!(raw.category_id.as_deref(), Some("cat1"));
    }

    #[test]
    fn test_from_transaction_refuses_transfer_legs() {
        let mut txn = Transaction::new(
            UserId::new("u1"),
            AccountId::new("acc1"),
            date(2026, 3, 4),
            Money::from_cents(-100),
            "Move",
        );
        txn.transfer_pair_id = Some(EntryId::new("txn2"));

        assert!(matches!(
            RawIntent::from_transaction(&txn),
            Err(FinanceError::TransferEditUnsupported)
        ));
    }
}
