//! Audit log CLI command

use clap::Args;

use crate::error::FinanceResult;
use crate::ledger::{LocalLedger, Session};

/// Arguments for `finance audit`
#[derive(Args)]
pub struct AuditArgs {
    /// Show only the most recent N entries
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Print the session user's audit trail, oldest first
pub fn handle_audit_command(
    ledger: &LocalLedger,
    session: &Session,
    args: AuditArgs,
) -> FinanceResult<()> {
    let entries = ledger.audit_trail(session, args.limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
