//! Account model
//!
//! Accounts are directory records owned by the ledger service. Forms only
//! need their id, name and type to populate selection inputs; the balance is
//! maintained by the service as entries are posted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, UserId};
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Bank account (checking, savings)
    Bank,
    /// Brokerage account holding a stock portfolio
    Stock,
    /// Credit card
    Card,
}

impl AccountType {
    /// All account types, in the order forms list them
    pub const ALL: [AccountType; 3] = [Self::Bank, Self::Stock, Self::Card];

    /// Parse account type from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bank" => Some(Self::Bank),
            "stock" | "stocks" => Some(Self::Stock),
            "card" | "credit" | "credit_card" => Some(Self::Card),
            _ => None,
        }
    }

    /// The wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bank => "BANK",
            Self::Stock => "STOCK",
            Self::Card => "CARD",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Owning user
    pub user_id: UserId,

    /// Account name (e.g., "Everyday Checking")
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current balance, maintained by the ledger service
    pub balance: Money,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account record
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        account_type: AccountType,
        balance: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::generate(),
            user_id,
            name: name.into(),
            account_type,
            balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a signed amount to the balance
    ///
    /// Returns `None` and leaves the account untouched if the new balance
    /// would not fit in the cent range.
    pub fn apply(&mut self, amount: Money) -> Option<Money> {
        self.balance = self.balance.checked_add(amount)?;
        self.updated_at = Utc::now();
        Some(self.balance)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Values entered into the account form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    /// Account type as typed; validated against [`AccountType`]
    pub account_type: Option<String>,
    /// Opening balance as typed
    pub balance: String,
}

/// A validated account form, ready to send to the directory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Opening balance, never negative
    pub balance: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new(
            UserId::new("u1"),
            "Checking",
            AccountType::Bank,
            Money::from_cents(1000),
        );
        assert_eq!(account.name, "Checking");
        assert_eq!(account.balance.cents(), 1000);
        assert!(account.id.as_str().starts_with("acc_"));
    }

    #[test]
    fn test_apply() {
        let mut account = Account::new(UserId::new("u1"), "Card", AccountType::Card, Money::zero());
        account.apply(Money::from_cents(-4250));
        assert_eq!(account.apply(Money::from_cents(1000)), Some(Money::from_cents(-3250)));
        assert_eq!(account.balance.cents(), -3250);
    }

    #[test]
    fn test_apply_refuses_overflow() {
        let mut account = Account::new(
            UserId::new("u1"),
            "Big",
            AccountType::Bank,
            Money::from_cents(i64::MAX),
        );
        let updated_at = account.updated_at;

        assert_eq!(account.apply(Money::from_cents(1)), None);
        assert_eq!(account.balance.cents(), i64::MAX);
        assert_eq!(account.updated_at, updated_at);
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("bank"), Some(AccountType::Bank));
        assert_eq!(AccountType::parse("STOCK"), Some(AccountType::Stock));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::Card));
        assert_eq!(AccountType::parse("checking"), None);
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let account = Account::new(UserId::new("u1"), "Brokerage", AccountType::Stock, Money::zero());
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "STOCK");
        assert_eq!(json["userId"], "u1");

        let back: Account = serde_json::from_value(json).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn test_display() {
        let account = Account::new(UserId::new("u1"), "Everyday", AccountType::Bank, Money::zero());
        assert_eq!(account.to_string(), "Everyday (BANK)");
    }
}
