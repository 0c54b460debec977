//! Transfer operations
//!
//! A transfer moves a positive amount from one account to another. It is
//! shaped here as a single request; debiting the source and crediting the
//! destination together is the ledger service's responsibility.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::AccountId;
use super::money::Money;
use super::transaction::Transaction;

/// Request body for a two-sided move between accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOperation {
    from_account_id: AccountId,
    to_account_id: AccountId,
    /// Always positive; each leg applies its own sign
    amount: Money,
    date: NaiveDate,
    description: String,
}

impl TransferOperation {
    pub(crate) fn new(
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Money,
        date: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
            date,
            description,
        }
    }

    pub fn from_account_id(&self) -> &AccountId {
        &self.from_account_id
    }

    pub fn to_account_id(&self) -> &AccountId {
        &self.to_account_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// The two persisted legs of a transfer
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// The outflow leg (negative amount, source account)
    pub from_transaction: Transaction,
    /// The inflow leg (positive amount, destination account)
    pub to_transaction: Transaction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let op = TransferOperation::new(
            AccountId::new("acc1"),
            AccountId::new("acc2"),
            Money::from_cents(10000),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            "Savings".into(),
        );

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["fromAccountId"], "acc1");
        assert_eq!(json["toAccountId"], "acc2");
        assert_eq!(json["amount"], 10000);
    }
}
