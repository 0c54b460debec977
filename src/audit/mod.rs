//! Audit trail of ledger writes
//!
//! Every record the local ledger creates or replaces is appended to a JSONL
//! file with the acting user, the entity and its before/after values.
//!
//! - `AuditEntry`: one line of the log
//! - `AuditLogger`: appends and reads the file
//! - `describe_changes`: short field-level summary for updates

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
