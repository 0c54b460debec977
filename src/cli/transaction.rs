//! Transaction CLI commands
//!
//! Fills a transaction form from the command line and submits it. Account
//! and category selections may be typed as names or ids.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::{DirectoryService, LedgerService, Session};
use crate::models::{EntryId, TransactionKind};
use crate::services::{DirectoryLookup, TransactionForm};

use super::{print_submitted, resolve_or_raw};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Description (at least 2 characters)
        description: String,
        /// Amount (e.g., "42.50"); the sign is taken from the kind
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Kind of transaction (income, expense, transfer)
        #[arg(short, long, default_value = "expense")]
        kind: TransactionKind,
        /// Account name or ID (the source account for transfers)
        #[arg(short, long)]
        account: String,
        /// Category name or ID (income and expense)
        #[arg(short, long)]
        category: Option<String>,
        /// Destination account name or ID (transfers)
        #[arg(long)]
        to: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Edit an income or expense transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New kind (income, expense); transfers cannot be edited
        #[arg(short, long)]
        kind: Option<TransactionKind>,
        /// New account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    ledger: &dyn LedgerService,
    directory: &dyn DirectoryService,
    session: &Session,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            kind,
            account,
            category,
            to,
            date,
        } => {
            let mut form =
                TransactionForm::new(ledger, directory).with_earliest(settings.earliest_date);
            form.values_mut().kind = kind;
            form.values_mut().description = description;
            form.values_mut().amount = amount;
            form.values_mut().date = Some(date.unwrap_or_else(today));

            let lookup = form.lookup();
            let account_id = resolve_or_raw(lookup.resolve_account(session, &account), &account)?;
            let category_id = category
                .map(|c| resolve_or_raw(lookup.resolve_category(session, &c, Some(kind)), &c))
                .transpose()?;
            let to_account_id = to
                .map(|t| resolve_or_raw(lookup.resolve_account(session, &t), &t))
                .transpose()?;

            form.values_mut().account_id = Some(account_id);
            form.values_mut().category_id = category_id;
            form.values_mut().to_account_id = to_account_id;

            let submitted = form.submit(session, chrono::Local::now().date_naive())?;
            print_submitted(&submitted, form.lookup(), session, settings)?;
        }

        TransactionCommands::Edit {
            id,
            description,
            amount,
            kind,
            account,
            category,
            date,
        } => {
            if kind == Some(TransactionKind::Transfer) {
                return Err(FinanceError::TransferEditUnsupported);
            }

            let mut form = TransactionForm::edit(ledger, directory, session, &EntryId::new(id))?
                .with_earliest(settings.earliest_date);

            if let Some(kind) = kind {
                form.values_mut().kind = kind;
            }
            if let Some(description) = description {
                form.values_mut().description = description;
            }
            if let Some(amount) = amount {
                form.values_mut().amount = amount;
            }
            if let Some(date) = date {
                form.values_mut().date = Some(date);
            }
            if let Some(account) = account {
                let resolved =
                    resolve_or_raw(form.lookup().resolve_account(session, &account), &account)?;
                form.values_mut().account_id = Some(resolved);
            }
            if let Some(category) = category {
                let kind = form.values().kind;
                let resolved = resolve_or_raw(
                    form.lookup().resolve_category(session, &category, Some(kind)),
                    &category,
                )?;
                form.values_mut().category_id = Some(resolved);
            }

            let submitted = form.submit(session, chrono::Local::now().date_naive())?;
            print_submitted(&submitted, form.lookup(), session, settings)?;
        }

        TransactionCommands::List { account, limit } => {
            let lookup = DirectoryLookup::new(directory);
            let mut transactions = ledger.list_entries(session)?;

            if let Some(account) = account {
                let id = lookup.resolve_account(session, &account)?;
                transactions.retain(|t| t.account_id == id);
            }
            transactions.truncate(limit);

            print!(
                "{}",
                format_transaction_register(
                    &transactions,
                    &lookup.accounts(session)?,
                    &lookup.categories(session)?,
                    settings,
                )
            );
        }

        TransactionCommands::Show { id } => {
            let lookup = DirectoryLookup::new(directory);
            let txn = ledger.get_entry(session, &EntryId::new(id))?;
            print!(
                "{}",
                format_transaction_details(
                    &txn,
                    &lookup.accounts(session)?,
                    &lookup.categories(session)?,
                    settings,
                )
            );
        }
    }

    Ok(())
}

fn today() -> String {
    let date: NaiveDate = chrono::Local::now().date_naive();
    date.format("%Y-%m-%d").to_string()
}
