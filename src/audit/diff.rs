//! Change summaries for audited updates

use serde_json::Value;

use crate::models::Money;

/// Bookkeeping fields that change on every write
const IGNORED_FIELDS: [&str; 1] = ["updatedAt"];

/// Fields holding a [`Money`] amount serialized as cents
const MONEY_FIELDS: [&str; 2] = ["amount", "balance"];

/// Describe top-level field changes between two serialized records
///
/// Returns `None` when nothing but bookkeeping fields changed.
pub fn describe_changes(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();
    for (key, before_val) in before_obj {
        if IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match after_obj.get(key) {
            Some(after_val) if after_val != before_val => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_field(key, before_val),
                format_field(key, after_val)
            )),
            Some(_) => {}
            None => changes.push(format!(
                "{}: {} -> (removed)",
                key,
                format_field(key, before_val)
            )),
        }
    }
    for (key, after_val) in after_obj {
        if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
            changes.push(format!("{}: (added) -> {}", key, format_field(key, after_val)));
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_field(key: &str, value: &Value) -> String {
    match value.as_i64() {
        Some(cents) if MONEY_FIELDS.contains(&key) => {
            Money::from_cents(cents).format_with_symbol("")
        }
        _ => format_value(value),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"description": "Rent", "amount": -100000, "date": "2026-10-01"});
        let after = json!({"description": "Rent", "amount": -110000, "date": "2026-10-02"});

        let diff = describe_changes(&before, &after).unwrap();
        assert!(diff.contains("amount: -1000.00 -> -1100.00"));
        assert!(diff.contains("date: \"2026-10-01\" -> \"2026-10-02\""));
        assert!(!diff.contains("description"));
    }

    #[test]
    fn test_bookkeeping_fields_ignored() {
        let before = json!({"amount": 5, "updatedAt": "a"});
        let after = json!({"amount": 5, "updatedAt": "b"});
        assert!(describe_changes(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"categoryId": "cat1"});
        let after = json!({"transferPairId": "txn2"});

        let diff = describe_changes(&before, &after).unwrap();
        assert!(diff.contains("categoryId: \"cat1\" -> (removed)"));
        assert!(diff.contains("transferPairId: (added) -> \"txn2\""));
    }

    #[test]
    fn test_long_string_truncated_on_char_boundary() {
        let before = json!({"description": "é".repeat(60)});
        let after = json!({"description": "short"});

        let diff = describe_changes(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_money_fields_are_formatted() {
        let before = json!({"balance": 5, "count": 5});
        let after = json!({"balance": 250, "count": 6});

        let diff = describe_changes(&before, &after).unwrap();
        assert!(diff.contains("balance: 0.05 -> 2.50"));
        assert!(diff.contains("count: 5 -> 6"));

        let added = describe_changes(&json!({}), &json!({"amount": -4250})).unwrap();
        assert_eq!(added, "amount: (added) -> -42.50");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!([1, 2])), "[2 items]");
    }
}
