//! finance - personal finance tracker
//!
//! This library resolves user-entered transaction forms into ledger
//! operations. A form is validated field by field, its amount is signed from
//! the transaction kind, and the result is routed to a single entry
//! (income/expense, create or update) or a two-leg transfer. Persistence is
//! delegated to a [`ledger::LedgerService`] and selection lists come from a
//! [`ledger::DirectoryService`]; both take an explicit session.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (accounts, categories, intents, entries)
//! - `validation`: Field-keyed form rules
//! - `services`: Form sessions, amount normalizer, operation builder
//! - `ledger`: Collaborator traits, session, and the local JSON ledger
//! - `storage`: JSON snapshot storage layer
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finance::config::FinancePaths;
//! use finance::ledger::{LocalLedger, Session};
//! use finance::models::{RawIntent, TransactionKind, UserId};
//! use finance::services::TransactionForm;
//!
//! let paths = FinancePaths::new()?;
//! let ledger = LocalLedger::open(&paths)?;
//! let session = Session::new(UserId::new("me"), "token");
//!
//! let today = chrono::Local::now().date_naive();
//! let mut form = TransactionForm::new(&ledger, &ledger);
//! let account = form.lookup().resolve_account(&session, "Checking")?;
//! let category =
//!     form.lookup().resolve_category(&session, "Food", Some(TransactionKind::Expense))?;
//! form.set_values(
//!     RawIntent::new(TransactionKind::Expense)
//!         .description("Groceries")
//!         .amount("42.50")
//!         .date(today)
//!         .account(account.as_str())
//!         .category(category.as_str()),
//! );
//! let submitted = form.submit(&session, today)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{FinanceError, FinanceResult};
