//! Amount normalizer
//!
//! Users always type a magnitude. The sign stored on a ledger entry comes
//! from the transaction kind alone.

use crate::models::{Money, TransactionKind};

/// Which way an entry moves the account balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inflow,
    Outflow,
}

impl Direction {
    /// The direction of a single-entry kind; transfers have two legs and none
    pub fn of(kind: TransactionKind) -> Option<Self> {
        match kind {
            TransactionKind::Income => Some(Self::Inflow),
            TransactionKind::Expense => Some(Self::Outflow),
            TransactionKind::Transfer => None,
        }
    }

    /// Give `amount` this direction's sign, whatever sign it had
    pub fn apply(self, amount: Money) -> Money {
        match self {
            Self::Inflow => amount.abs(),
            Self::Outflow => -amount.abs(),
        }
    }
}

/// Signed ledger amount for `kind`
///
/// EXPENSE is negative, INCOME positive. A transfer has no single signed
/// amount and yields `None`.
pub fn signed_amount(kind: TransactionKind, amount: Money) -> Option<Money> {
    Direction::of(kind).map(|direction| direction.apply(amount))
}
