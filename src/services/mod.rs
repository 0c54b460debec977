//! Service layer for the finance CLI
//!
//! The service layer turns form input into ledger and directory requests:
//! the transaction form with its submission lifecycle, the amount normalizer
//! and operation builder it relies on, the per-form directory lookup, and the
//! account and category forms.

pub mod account;
pub mod amount;
pub mod category;
pub mod directory;
pub mod form;
pub mod operation;

pub use account::AccountService;
pub use amount::{signed_amount, Direction};
pub use category::{CategoryService, CategoryWithChildren};
pub use directory::DirectoryLookup;
pub use form::{Notice, Submitted, TransactionForm, SUBMISSION_FAILED};
pub use operation::{build_operation, Operation};
