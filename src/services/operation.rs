//! Operation builder
//!
//! Maps a validated intent to the request the ledger service receives. This
//! is a pure mapping; nothing is sent from here.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{EntryId, IntentTarget, LedgerEntry, TransactionIntent, TransferOperation};

use super::amount::Direction;

/// A request for the ledger service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert a new entry
    CreateEntry(LedgerEntry),
    /// Replace an existing entry
    UpdateEntry { id: EntryId, entry: LedgerEntry },
    /// Move money between two accounts
    Transfer(TransferOperation),
}

/// Route a validated intent to its operation
///
/// With `existing` set, an income or expense becomes an update of that entry.
/// Transfers are only ever created; asking to update one fails with
/// [`FinanceError::TransferEditUnsupported`].
pub fn build_operation(
    intent: &TransactionIntent,
    existing: Option<&EntryId>,
) -> FinanceResult<Operation> {
    let (direction, category) = match intent.target() {
        IntentTarget::Transfer(destination) => {
            if existing.is_some() {
                return Err(FinanceError::TransferEditUnsupported);
            }
            return Ok(Operation::Transfer(TransferOperation::new(
                intent.account_id().clone(),
                destination.clone(),
                intent.amount(),
                intent.date(),
                intent.description().to_string(),
            )));
        }
        IntentTarget::Income(category) => (Direction::Inflow, category),
        IntentTarget::Expense(category) => (Direction::Outflow, category),
    };

    let entry = LedgerEntry::new(
        intent.description().to_string(),
        direction.apply(intent.amount()),
        intent.date(),
        intent.account_id().clone(),
        Some(category.clone()),
    );

    Ok(match existing {
        Some(id) => Operation::UpdateEntry {
            id: id.clone(),
            entry,
        },
        None => Operation::CreateEntry(entry),
    })
}
