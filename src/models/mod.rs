//! Core data models
//!
//! Directory records (accounts, categories), the transaction form and its
//! validated intent, and the request/response shapes exchanged with the
//! ledger service.

pub mod account;
pub mod category;
pub mod entry;
pub mod ids;
pub mod intent;
pub mod money;
pub mod transaction;
pub mod transfer;

pub use account::{Account, AccountDraft, AccountType, NewAccount};
pub use category::{Category, CategoryDraft, CategoryType, NewCategory};
pub use entry::LedgerEntry;
pub use ids::{AccountId, CategoryId, EntryId, UserId};
pub use intent::{IntentTarget, RawIntent, TransactionIntent, TransactionKind};
pub use money::{Money, MoneyParseError};
pub use transaction::Transaction;
pub use transfer::{TransferOperation, TransferReceipt};
