//! Category display formatting
//!
//! Formats categories for terminal output as a parent/child tree.

use crate::models::Category;
use crate::services::CategoryWithChildren;

/// Format categories as a tree of top-level categories and their children
pub fn format_category_tree(tree: &[CategoryWithChildren]) -> String {
    if tree.is_empty() {
        return "No categories found.\n\nRun 'finance category create' to add one.".to_string();
    }

    let mut output = String::new();

    for node in tree {
        output.push_str(&format!(
            "{} [{}]\n",
            node.category.name, node.category.category_type
        ));

        for (j, child) in node.children.iter().enumerate() {
            let prefix = if j == node.children.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            output.push_str(&format!("  {}{}\n", prefix, child.name));
        }
    }

    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category, parent: Option<&Category>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  Type:     {}\n", category.category_type));
    output.push_str(&format!("  ID:       {}\n", category.id));
    if let Some(parent) = parent {
        output.push_str(&format!("  Parent:   {}\n", parent.name));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, UserId};

    #[test]
    fn test_format_empty_tree() {
        assert!(format_category_tree(&[]).contains("No categories found"));
    }

    #[test]
    fn test_format_category_tree() {
        let user = UserId::new("u1");
        let housing = Category::new(user.clone(), "Housing", CategoryType::Expense);
        let rent = Category::with_parent(
            user.clone(),
            "Rent",
            CategoryType::Expense,
            housing.id.clone(),
        );
        let power = Category::with_parent(user, "Power", CategoryType::Expense, housing.id.clone());

        let output = format_category_tree(&[CategoryWithChildren {
            category: housing,
            children: vec![rent, power],
        }]);

        assert!(output.contains("Housing [EXPENSE]"));
        assert!(output.contains("├── Rent"));
        assert!(output.contains("└── Power"));
    }
}
