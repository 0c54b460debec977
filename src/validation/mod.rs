//! Form validation rules
//!
//! Each form (transaction, account, category) is checked field by field and
//! every violation is collected, so a caller can surface all problems at once.
//! Rules are pure functions of the raw input and a [`ValidationContext`]; calling
//! them twice on the same input yields the same result.

pub mod account;
pub mod category;
pub mod transaction;

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Account, Category};

pub use account::validate_account;
pub use category::validate_category;
pub use transaction::validate_intent;

/// Minimum length for descriptions and names
pub const MIN_TEXT_LEN: usize = 2;

/// Names of the form fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Kind,
    Description,
    Amount,
    Date,
    AccountId,
    ToAccountId,
    CategoryId,
    Name,
    Type,
    Balance,
    ParentId,
}

impl Field {
    /// The wire name of the field, as the form and the ledger service spell it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Date => "date",
            Self::AccountId => "accountId",
            Self::ToAccountId => "toAccountId",
            Self::CategoryId => "categoryId",
            Self::Name => "name",
            Self::Type => "type",
            Self::Balance => "balance",
            Self::ParentId => "parentId",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures keyed by field, one message per violated field
///
/// The first message recorded for a field wins; later rules on the same field
/// do not overwrite it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field unless the field already has one
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    /// Whether a field already carries a message
    pub fn has(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// The message recorded for a field
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over `(field, message)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// The fields that failed, in field order
    pub fn fields(&self) -> Vec<Field> {
        self.fields.keys().copied().collect()
    }

    /// Turn the collected errors into a result carrying `value` when empty
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// What the rules need to know besides the raw input
///
/// The directory lists are optional: without them the rules only check shape,
/// with them they also check that referenced accounts and categories exist and
/// that a category's type matches the transaction kind.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Latest acceptable transaction date
    pub today: NaiveDate,
    /// Earliest acceptable transaction date
    pub earliest: NaiveDate,
    /// Known accounts, when the directory has been loaded
    pub accounts: Option<&'a [Account]>,
    /// Known categories, when the directory has been loaded
    pub categories: Option<&'a [Category]>,
}

impl<'a> ValidationContext<'a> {
    /// A shape-only context bounded by `today` and the default earliest date
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            earliest: default_earliest_date(),
            accounts: None,
            categories: None,
        }
    }

    /// Set the earliest acceptable date
    pub fn with_earliest(mut self, earliest: NaiveDate) -> Self {
        self.earliest = earliest;
        self
    }

    /// Attach the directory lists for existence and type checks
    pub fn with_directory(mut self, accounts: &'a [Account], categories: &'a [Category]) -> Self {
        self.accounts = Some(accounts);
        self.categories = Some(categories);
        self
    }
}

/// 1900-01-01, the earliest date the date picker offers
pub fn default_earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Check a free-text field for the minimum length, counted in characters
pub(crate) fn check_min_len(
    errors: &mut ValidationErrors,
    field: Field,
    value: &str,
    message: &str,
) {
    if value.trim().chars().count() < MIN_TEXT_LEN {
        errors.add(field, message);
    }
}

/// Treat blank optional strings as missing
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
