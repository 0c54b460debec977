//! CLI command handler for account transfers
//!
//! Fills a transfer form and submits it; the ledger writes both legs.

use crate::config::Settings;
use crate::error::FinanceResult;
use crate::ledger::{DirectoryService, LedgerService, Session};
use crate::models::{RawIntent, TransactionKind};
use crate::services::TransactionForm;

use super::{print_submitted, resolve_or_raw};

/// Arguments of the transfer command
#[derive(clap::Args)]
pub struct TransferArgs {
    /// Source account name or ID
    pub from: String,
    /// Destination account name or ID
    pub to: String,
    /// Amount to move (e.g., "100.00")
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    /// Description
    #[arg(short = 'm', long, default_value = "Transfer")]
    pub description: String,
    /// Transfer date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Handle the transfer command
pub fn handle_transfer_command(
    ledger: &dyn LedgerService,
    directory: &dyn DirectoryService,
    session: &Session,
    settings: &Settings,
    args: TransferArgs,
) -> FinanceResult<()> {
    let today = chrono::Local::now().date_naive();
    let mut form = TransactionForm::new(ledger, directory).with_earliest(settings.earliest_date);

    let from = resolve_or_raw(form.lookup().resolve_account(session, &args.from), &args.from)?;
    let to = resolve_or_raw(form.lookup().resolve_account(session, &args.to), &args.to)?;

    let mut values = RawIntent::new(TransactionKind::Transfer)
        .description(args.description)
        .amount(args.amount)
        .account(from)
        .to_account(to);
    values.date = Some(
        args.date
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
    );
    form.set_values(values);

    let submitted = form.submit(session, today)?;
    print_submitted(&submitted, form.lookup(), session, settings)
}
