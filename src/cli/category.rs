//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::display::category::format_category_tree;
use crate::error::FinanceResult;
use crate::ledger::{DirectoryService, Session};
use crate::models::{CategoryType, NewCategory, TransactionKind};
use crate::services::{CategoryService, DirectoryLookup};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Category type (INCOME, EXPENSE)
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
        /// Parent category name or ID; must be a top-level category
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// List categories as a tree
    List,
}

/// Handle a category command
pub fn handle_category_command(
    directory: &dyn DirectoryService,
    session: &Session,
    cmd: CategoryCommands,
) -> FinanceResult<()> {
    let service = CategoryService::new(directory);

    match cmd {
        CategoryCommands::Create {
            name,
            category_type,
            parent,
        } => {
            // Same-named categories of both types are common; prefer the parent
            // whose type matches the new category.
            let kind = category_type
                .as_deref()
                .and_then(CategoryType::parse)
                .map(|t| match t {
                    CategoryType::Income => TransactionKind::Income,
                    CategoryType::Expense => TransactionKind::Expense,
                });
            let parent_id = match parent {
                Some(parent) => Some(super::resolve_or_raw(
                    DirectoryLookup::new(directory).resolve_category(session, &parent, kind),
                    &parent,
                )?),
                None => None,
            };

            let category = service.create(
                session,
                &NewCategory {
                    name,
                    category_type,
                    parent_id,
                },
            )?;

            println!("Created category: {}", category.name);
            println!("  Type: {}", category.category_type);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List => {
            let tree = service.tree(session)?;
            println!("{}", format_category_tree(&tree));
        }
    }

    Ok(())
}
