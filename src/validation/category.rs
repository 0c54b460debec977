//! Category form rules

use super::{check_min_len, non_blank, Field, ValidationErrors};
use crate::models::{Category, CategoryDraft, CategoryId, CategoryType, NewCategory};

/// Validate the category form
///
/// When `existing` is given, a parent must be one of those categories, must
/// itself be top-level, and must share the new category's type.
pub fn validate_category(
    form: &NewCategory,
    existing: Option<&[Category]>,
) -> Result<CategoryDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = form.name.trim();

    check_min_len(
        &mut errors,
        Field::Name,
        name,
        "Name must be at least 2 characters",
    );

    let category_type = match non_blank(form.category_type.as_deref()) {
        None => {
            errors.add(Field::Type, "Please select a type");
            None
        }
        Some(input) => {
            let parsed = CategoryType::parse(input);
            if parsed.is_none() {
                errors.add(Field::Type, "Type must be INCOME or EXPENSE");
            }
            parsed
        }
    };

    let parent_id = non_blank(form.parent_id.as_deref()).map(CategoryId::new);
    if let (Some(parent_id), Some(categories)) = (&parent_id, existing) {
        match categories.iter().find(|c| &c.id == parent_id) {
            None => errors.add(Field::ParentId, "Parent category not found"),
            Some(parent) if !parent.is_top_level() => {
                errors.add(Field::ParentId, "Parent category must be a top-level category")
            }
            Some(parent) if category_type.is_some_and(|t| t != parent.category_type) => errors.add(
                Field::ParentId,
                format!(
                    "Parent category '{}' is {}",
                    parent.name, parent.category_type
                ),
            ),
            Some(_) => {}
        }
    }

    match category_type {
        Some(category_type) if errors.is_empty() => Ok(CategoryDraft {
            name: name.to_string(),
            category_type,
            parent_id,
        }),
        _ => Err(errors),
    }
}
