//! Transaction display formatting
//!
//! Register and detail views for persisted ledger records. Account and
//! category ids are shown by name when the directory lists know them.

use super::format_date;
use crate::config::Settings;
use crate::models::{Account, Category, Transaction};

fn account_name<'a>(accounts: &'a [Account], txn: &'a Transaction) -> &'a str {
    accounts
        .iter()
        .find(|a| a.id == txn.account_id)
        .map(|a| a.name.as_str())
        .unwrap_or(txn.account_id.as_str())
}

fn category_label(categories: &[Category], txn: &Transaction) -> String {
    if txn.is_transfer() {
        return "⇄ Transfer".to_string();
    }
    match &txn.category_id {
        Some(id) => categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None => "(uncategorized)".to_string(),
    }
}

/// Format a single register row
pub fn format_transaction_row(
    txn: &Transaction,
    accounts: &[Account],
    categories: &[Category],
    settings: &Settings,
) -> String {
    format!(
        "{:10} {:16} {:24} {:16} {:>12}  {}",
        format_date(txn.date, &settings.date_format),
        truncate(account_name(accounts, txn), 16),
        truncate(&txn.description, 24),
        truncate(&category_label(categories, txn), 16),
        txn.amount.format_with_symbol(&settings.currency_symbol),
        txn.id
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    accounts: &[Account],
    categories: &[Category],
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:16} {:24} {:16} {:>12}  {}\n",
        "Date", "Account", "Description", "Category", "Amount", "ID"
    ));
    output.push_str(&"-".repeat(100));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, accounts, categories, settings));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    accounts: &[Account],
    categories: &[Category],
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        format_date(txn.date, &settings.date_format)
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Account:     {}\n", account_name(accounts, txn)));
    output.push_str(&format!(
        "Category:    {}\n",
        category_label(categories, txn)
    ));
    if let Some(pair) = &txn.transfer_pair_id {
        output.push_str(&format!("Linked:      {}\n", pair));
    }

    output
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
