//! Ledger entries
//!
//! A [`LedgerEntry`] is the request body for creating or replacing a single
//! signed record on one account. It is built once per submission and never
//! mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, CategoryId};
use super::money::Money;

/// A single signed monetary record attached to one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    description: String,
    /// Negative for expenses, positive for income
    #[serde(rename = "amount")]
    signed_amount: Money,
    date: NaiveDate,
    account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_id: Option<CategoryId>,
}

impl LedgerEntry {
    pub(crate) fn new(
        description: String,
        signed_amount: Money,
        date: NaiveDate,
        account_id: AccountId,
        category_id: Option<CategoryId>,
    ) -> Self {
        Self {
            description,
            signed_amount,
            date,
            account_id,
            category_id,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn signed_amount(&self) -> Money {
        self.signed_amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn category_id(&self) -> Option<&CategoryId> {
        self.category_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let entry = LedgerEntry::new(
            "Groceries".into(),
            Money::from_cents(-4250),
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            AccountId::new("acc1"),
            Some(CategoryId::new("cat1")),
        );

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "description": "Groceries",
                "amount": -4250,
                "date": "2026-10-17",
                "accountId": "acc1",
                "categoryId": "cat1"
            })
        );
    }
}
