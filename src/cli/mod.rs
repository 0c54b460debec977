//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod audit;
pub mod category;
pub mod transaction;
pub mod transfer;

pub use account::{handle_account_command, AccountCommands};
pub use audit::{handle_audit_command, AuditArgs};
pub use category::{handle_category_command, CategoryCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use transfer::{handle_transfer_command, TransferArgs};

use std::fmt::Display;

use crate::config::Settings;
use crate::display::{format_notice, format_transaction_row};
use crate::error::FinanceResult;
use crate::ledger::Session;
use crate::services::{DirectoryLookup, Submitted};

/// Use the resolved id, or pass unknown input through for validation to report
pub(crate) fn resolve_or_raw<T: Display>(
    resolved: FinanceResult<T>,
    input: &str,
) -> FinanceResult<String> {
    match resolved {
        Ok(id) => Ok(id.to_string()),
        Err(e) if e.is_not_found() => Ok(input.trim().to_string()),
        Err(e) => Err(e),
    }
}

/// Print the success notice followed by the persisted records
pub(crate) fn print_submitted(
    submitted: &Submitted,
    lookup: &DirectoryLookup<'_>,
    session: &Session,
    settings: &Settings,
) -> FinanceResult<()> {
    print!("{}", format_notice(submitted.notice));
    let accounts = lookup.accounts(session)?;
    let categories = lookup.categories(session)?;
    for txn in &submitted.transactions {
        println!(
            "  {}",
            format_transaction_row(txn, &accounts, &categories, settings)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use crate::models::AccountId;

    #[test]
    fn test_resolve_or_raw() {
        assert_eq!(
            resolve_or_raw(Ok(AccountId::new("acc1")), "Checking").unwrap(),
            "acc1"
        );
        assert_eq!(
            resolve_or_raw::<AccountId>(Err(FinanceError::account_not_found("x")), " x ").unwrap(),
            "x"
        );
        assert!(resolve_or_raw::<AccountId>(Err(FinanceError::Storage("io".into())), "x").is_err());
    }
}
