//! Account form rules

use super::{check_min_len, non_blank, Field, ValidationErrors};
use crate::models::{Account, AccountDraft, AccountType, Money, MoneyParseError, NewAccount};

/// Validate the account form
///
/// A blank opening balance means zero. When `existing` is given, a name that
/// matches another account (ignoring case) is rejected.
pub fn validate_account(
    form: &NewAccount,
    existing: Option<&[Account]>,
) -> Result<AccountDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = form.name.trim();

    check_min_len(
        &mut errors,
        Field::Name,
        name,
        "Name must be at least 2 characters",
    );
    if let Some(accounts) = existing {
        if accounts.iter().any(|a| a.name.eq_ignore_ascii_case(name)) {
            errors.add(
                Field::Name,
                format!("An account named '{}' already exists", name),
            );
        }
    }

    let account_type = match non_blank(form.account_type.as_deref()) {
        None => {
            errors.add(Field::Type, "Please select an account type");
            None
        }
        Some(input) => {
            let parsed = AccountType::parse(input);
            if parsed.is_none() {
                errors.add(Field::Type, "Account type must be one of BANK, STOCK, CARD");
            }
            parsed
        }
    };

    let balance = match Money::parse(&form.balance) {
        Err(MoneyParseError::Empty) => Some(Money::zero()),
        Ok(balance) if balance.is_negative() => {
            errors.add(Field::Balance, "Balance must be positive");
            None
        }
        Ok(balance) => Some(balance),
        Err(MoneyParseError::TooManyDecimals(_)) => {
            errors.add(Field::Balance, "Balance can have at most two decimal places");
            None
        }
        Err(_) => {
            errors.add(Field::Balance, "Balance must be a number");
            None
        }
    };

    match (account_type, balance) {
        (Some(account_type), Some(balance)) if errors.is_empty() => Ok(AccountDraft {
            name: name.to_string(),
            account_type,
            balance,
        }),
        _ => Err(errors),
    }
}
