//! In-memory category repository

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Category, CategoryId, UserId};

use super::poisoned;

/// Categories of every user, keyed by id
#[derive(Default)]
pub struct CategoryRepository {
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&self, categories: Vec<Category>) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.clear();
        data.extend(categories.into_iter().map(|c| (c.id.clone(), c)));
        Ok(())
    }

    pub fn get_all(&self) -> Result<Vec<Category>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(categories)
    }

    /// Categories owned by `user`: by type, then name
    pub fn get_for_user(&self, user: &UserId) -> Result<Vec<Category>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut categories: Vec<_> = data
            .values()
            .filter(|c| &c.user_id == user)
            .cloned()
            .collect();
        categories.sort_by(|a, b| {
            a.category_type
                .as_str()
                .cmp(b.category_type.as_str())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(categories)
    }

    pub fn get(&self, user: &UserId, id: &CategoryId) -> Result<Option<Category>, FinanceError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.get(id).filter(|c| &c.user_id == user).cloned())
    }

    pub fn upsert(&self, category: Category) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.insert(category.id.clone(), category);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryType;

    #[test]
    fn test_get_for_user_groups_by_type() {
        let repo = CategoryRepository::new();
        let user = UserId::new("u1");
        repo.upsert(Category::new(user.clone(), "Salary", CategoryType::Income)).unwrap();
        repo.upsert(Category::new(user.clone(), "rent", CategoryType::Expense)).unwrap();
        repo.upsert(Category::new(user.clone(), "Food", CategoryType::Expense)).unwrap();
        repo.upsert(Category::new(UserId::new("u2"), "Hidden", CategoryType::Expense))
            .unwrap();

        let names: Vec<_> = repo
            .get_for_user(&user)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Food", "rent", "Salary"]);
    }

    #[test]
    fn test_replace_all() {
        let repo = CategoryRepository::new();
        let user = UserId::new("u1");
        repo.upsert(Category::new(user.clone(), "Old", CategoryType::Expense)).unwrap();

        let fresh = Category::new(user.clone(), "New", CategoryType::Income);
        let id = fresh.id.clone();
        repo.replace_all(vec![fresh]).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 1);
        assert_eq!(repo.get(&user, &id).unwrap().unwrap().name, "New");
    }
}
