//! Category service
//!
//! Creates categories after checking them against the user's existing list,
//! and arranges the list as top-level categories with their children.

use tracing::{info, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::ledger::{DirectoryService, Session};
use crate::models::{Category, NewCategory};
use crate::validation::validate_category;

/// Message shown when the directory fails to create a category
pub const CATEGORY_CREATE_FAILED: &str = "Failed to create category. Please try again.";

/// Service for category management
pub struct CategoryService<'a> {
    directory: &'a dyn DirectoryService,
}

/// A top-level category with its subcategories
#[derive(Debug, Clone)]
pub struct CategoryWithChildren {
    pub category: Category,
    pub children: Vec<Category>,
}

impl<'a> CategoryService<'a> {
    pub fn new(directory: &'a dyn DirectoryService) -> Self {
        Self { directory }
    }

    /// Validate and create a category
    pub fn create(&self, session: &Session, form: &NewCategory) -> FinanceResult<Category> {
        let existing = self.directory.list_categories(session)?;
        let draft = validate_category(form, Some(&existing))?;

        let category = self
            .directory
            .create_category(session, &draft)
            .map_err(|e| {
                warn!(error = %e, "Category creation failed");
                FinanceError::submission(CATEGORY_CREATE_FAILED, e)
            })?;

        info!(category = %category.name, kind = %category.category_type, "Category created");
        Ok(category)
    }

    pub fn list(&self, session: &Session) -> FinanceResult<Vec<Category>> {
        self.directory.list_categories(session)
    }

    /// Categories grouped under their parents, in directory order
    ///
    /// A child whose parent is missing from the list is shown as top-level.
    pub fn tree(&self, session: &Session) -> FinanceResult<Vec<CategoryWithChildren>> {
        let categories = self.list(session)?;
        let is_listed = |c: &Category| {
            c.parent_id
                .as_ref()
                .is_some_and(|p| categories.iter().any(|other| &other.id == p))
        };

        let mut tree: Vec<CategoryWithChildren> = categories
            .iter()
            .filter(|c| !is_listed(c))
            .map(|c| CategoryWithChildren {
                category: c.clone(),
                children: Vec::new(),
            })
            .collect();

        for child in categories.iter().filter(|c| is_listed(c)) {
            if let Some(node) = tree
                .iter_mut()
                .find(|n| Some(&n.category.id) == child.parent_id.as_ref())
            {
                node.children.push(child.clone());
            }
        }

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryType;
    use crate::services::directory::tests::{session, FakeDirectory};
    use crate::validation::Field;

    fn form(name: &str, kind: &str, parent: Option<&str>) -> NewCategory {
        NewCategory {
            name: name.into(),
            category_type: Some(kind.into()),
            parent_id: parent.map(String::from),
        }
    }

    #[test]
    fn test_create_subcategory_and_tree() {
        let directory = FakeDirectory::seeded();
        let service = CategoryService::new(&directory);

        let created = service
            .create(&session(), &form("Groceries", "EXPENSE", Some("cat1")))
            .unwrap();
        assert_eq!(created.category_type, CategoryType::Expense);

        let tree = service.tree(&session()).unwrap();
        assert_eq!(tree.len(), 4);
        let food = tree.iter().find(|n| n.category.name == "Food").unwrap();
        assert_eq!(food.children.len(), 1);
        assert_eq!(food.children[0].id, created.id);
    }

    #[test]
    fn test_parent_type_mismatch() {
        let directory = FakeDirectory::seeded();
        let service = CategoryService::new(&directory);

        let err = service
            .create(&session(), &form("Tips", "INCOME", Some("cat1")))
            .unwrap_err();

        assert_eq!(
            err.validation_errors().unwrap().get(Field::ParentId),
            Some("Parent category 'Food' is EXPENSE")
        );
    }
}
