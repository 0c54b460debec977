//! Display formatting for terminal output
//!
//! Provides utilities for formatting accounts, categories, transactions and
//! form feedback for terminal display.

pub mod account;
pub mod category;
pub mod feedback;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use category::{format_category_details, format_category_tree};
pub use feedback::{format_error, format_notice, format_validation_errors};
pub use transaction::{
    format_transaction_details, format_transaction_register, format_transaction_row,
};

use std::fmt::Write;

use chrono::NaiveDate;

/// Format `date` with a user-configured pattern, falling back to ISO dates
pub(crate) fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}
