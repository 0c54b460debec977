//! Category model
//!
//! Categories classify income and expense entries. They form a shallow tree:
//! a category may name a parent, and nothing deeper than two levels is used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::intent::TransactionKind;

/// Whether a category classifies money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    /// Parse category type from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// The wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Whether entries of `kind` may use a category of this type
    pub fn accepts(&self, kind: TransactionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Income, TransactionKind::Income) | (Self::Expense, TransactionKind::Expense)
        )
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category record from the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Owning user
    pub user_id: UserId,

    /// Category name
    pub name: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub category_type: CategoryType,

    /// Parent category, if this is a sub-category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new top-level category
    pub fn new(user_id: UserId, name: impl Into<String>, category_type: CategoryType) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::generate(),
            user_id,
            name: name.into(),
            category_type,
            parent_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a sub-category under `parent_id`
    pub fn with_parent(
        user_id: UserId,
        name: impl Into<String>,
        category_type: CategoryType,
        parent_id: CategoryId,
    ) -> Self {
        let mut category = Self::new(user_id, name, category_type);
        category.parent_id = Some(parent_id);
        category
    }

    /// Whether this category sits at the top of the tree
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category_type)
    }
}

/// Values entered into the category form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    /// Category type as typed; validated against [`CategoryType`]
    pub category_type: Option<String>,
    /// Parent category id, if any
    pub parent_id: Option<String>,
}

/// A validated category form, ready to send to the directory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_type_accepts_matching_kind_only() {
        assert!(CategoryType::Income.accepts(TransactionKind::Income));
        assert!(CategoryType::Expense.accepts(TransactionKind::Expense));
        assert!(!CategoryType::Income.accepts(TransactionKind::Expense));
        assert!(!CategoryType::Expense.accepts(TransactionKind::Transfer));
    }

    #[test]
    fn test_with_parent() {
        let user = UserId::new("u1");
        let parent = Category::new(user.clone(), "Housing", CategoryType::Expense);
        let child = Category::with_parent(user, "Rent", CategoryType::Expense, parent.id.clone());

        assert!(parent.is_top_level());
        assert!(!child.is_top_level());
        assert_eq!(child.parent_id, Some(parent.id));
    }

    #[test]
    fn test_serialization() {
        let category = Category::new(UserId::new("u1"), "Salary", CategoryType::Income);
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], "INCOME");
        assert!(json.get("parentId").is_none());

        let back: Category = serde_json::from_value(json).unwrap();
        assert_eq!(back, category);
    }

    #[test]
    fn test_parse() {
        assert_eq!(CategoryType::parse("Income"), Some(CategoryType::Income));
        assert_eq!(CategoryType::parse("EXPENSE"), Some(CategoryType::Expense));
        assert_eq!(CategoryType::parse("transfer"), None);
    }
}
