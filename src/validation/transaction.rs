//! Transaction form rules
//!
//! Turns a [`RawIntent`] into a [`TransactionIntent`] or a field-keyed set of
//! failures. Every rule runs, so one call reports every problem with the form.

use chrono::NaiveDate;

use super::{check_min_len, non_blank, Field, ValidationContext, ValidationErrors};
use crate::models::{
    AccountId, CategoryId, IntentTarget, Money, MoneyParseError, RawIntent, TransactionIntent,
    TransactionKind,
};

/// Validate and normalize a transaction form
///
/// Fields that do not apply to the chosen kind (a category on a transfer, a
/// destination account on an expense) are ignored rather than reported.
pub fn validate_intent(
    raw: &RawIntent,
    ctx: &ValidationContext<'_>,
) -> Result<TransactionIntent, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_min_len(
        &mut errors,
        Field::Description,
        &raw.description,
        "Description must be at least 2 characters",
    );

    let amount = check_amount(&mut errors, &raw.amount);
    let date = check_date(&mut errors, raw.date.as_deref(), ctx);
    let source = check_source_account(&mut errors, raw.account_id.as_deref(), ctx);

    let target = match raw.kind {
        TransactionKind::Transfer => check_destination(
            &mut errors,
            raw.to_account_id.as_deref(),
            raw.account_id.as_deref(),
            ctx,
        )
        .map(IntentTarget::Transfer),
        kind => check_category(&mut errors, raw.category_id.as_deref(), kind, ctx).map(|id| {
            if kind == TransactionKind::Income {
                IntentTarget::Income(id)
            } else {
                IntentTarget::Expense(id)
            }
        }),
    };

    match (amount, date, source, target) {
        (Some(amount), Some(date), Some(source), Some(target)) if errors.is_empty() => {
            Ok(TransactionIntent::new(
                raw.description.trim().to_string(),
                amount,
                date,
                source,
                target,
            ))
        }
        _ => Err(errors),
    }
}

/// Parse the amount and take its magnitude
fn check_amount(errors: &mut ValidationErrors, input: &str) -> Option<Money> {
    let message = match Money::parse(input) {
        Ok(amount) if amount.is_zero() => "Amount cannot be zero",
        Ok(amount) => return Some(amount.abs()),
        Err(MoneyParseError::Empty) => "Amount is required",
        Err(MoneyParseError::InvalidFormat(_)) => "Amount must be a number",
        Err(MoneyParseError::TooManyDecimals(_)) => "Amount can have at most two decimal places",
        Err(MoneyParseError::OutOfRange(_)) => "Amount is too large",
    };
    errors.add(Field::Amount, message);
    None
}

fn check_date(
    errors: &mut ValidationErrors,
    input: Option<&str>,
    ctx: &ValidationContext<'_>,
) -> Option<NaiveDate> {
    let Some(input) = non_blank(input) else {
        errors.add(Field::Date, "Please select a date");
        return None;
    };

    let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") else {
        errors.add(Field::Date, "Date must be a valid calendar date (YYYY-MM-DD)");
        return None;
    };

    if date > ctx.today {
        errors.add(Field::Date, "Date cannot be in the future");
        None
    } else if date < ctx.earliest {
        errors.add(
            Field::Date,
            format!("Date cannot be before {}", ctx.earliest.format("%Y-%m-%d")),
        );
        None
    } else {
        Some(date)
    }
}

fn check_source_account(
    errors: &mut ValidationErrors,
    input: Option<&str>,
    ctx: &ValidationContext<'_>,
) -> Option<AccountId> {
    let Some(id) = non_blank(input) else {
        errors.add(Field::AccountId, "Please select an account");
        return None;
    };

    if !account_known(id, ctx) {
        errors.add(Field::AccountId, "Account not found");
        return None;
    }

    Some(AccountId::new(id))
}

fn check_destination(
    errors: &mut ValidationErrors,
    input: Option<&str>,
    source_input: Option<&str>,
    ctx: &ValidationContext<'_>,
) -> Option<AccountId> {
    let Some(id) = non_blank(input) else {
        errors.add(Field::ToAccountId, "Please select a destination account");
        return None;
    };

    // Compared on the raw selections so the rule holds even when the source
    // account fails its own checks.
    if non_blank(source_input) == Some(id) {
        errors.add(
            Field::ToAccountId,
            "Destination account must differ from source account",
        );
        return None;
    }

    if !account_known(id, ctx) {
        errors.add(Field::ToAccountId, "Account not found");
        return None;
    }

    Some(AccountId::new(id))
}

fn check_category(
    errors: &mut ValidationErrors,
    input: Option<&str>,
    kind: TransactionKind,
    ctx: &ValidationContext<'_>,
) -> Option<CategoryId> {
    let Some(id) = non_blank(input) else {
        errors.add(Field::CategoryId, "Please select a category");
        return None;
    };

    if let Some(categories) = ctx.categories {
        let Some(category) = categories.iter().find(|c| c.id.as_str() == id) else {
            errors.add(Field::CategoryId, "Category not found");
            return None;
        };

        if !category.category_type.accepts(kind) {
            errors.add(
                Field::CategoryId,
                format!(
                    "Category '{}' is {} but the transaction is {}",
                    category.name, category.category_type, kind
                ),
            );
            return None;
        }
    }

    Some(CategoryId::new(id))
}

fn account_known(id: &str, ctx: &ValidationContext<'_>) -> bool {
    ctx.accounts
        .map_or(true, |accounts| accounts.iter().any(|a| a.id.as_str() == id))
}
