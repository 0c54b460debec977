//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::FinanceResult;
use crate::ledger::{DirectoryService, Session};
use crate::models::NewAccount;
use crate::services::{AccountService, DirectoryLookup};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (BANK, STOCK, CARD)
        #[arg(short = 't', long = "type")]
        account_type: Option<String>,
        /// Opening balance (e.g., "1000.00"); blank means zero
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        balance: String,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(
    directory: &dyn DirectoryService,
    session: &Session,
    settings: &Settings,
    cmd: AccountCommands,
) -> FinanceResult<()> {
    let service = AccountService::new(directory);

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            balance,
        } => {
            let account = service.create(
                session,
                &NewAccount {
                    name,
                    account_type,
                    balance,
                },
            )?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!(
                "  Balance: {}",
                account.balance.format_with_symbol(&settings.currency_symbol)
            );
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            let accounts = service.list(session)?;
            println!(
                "{}",
                format_account_list(&accounts, &settings.currency_symbol)
            );
        }

        AccountCommands::Show { account } => {
            let lookup = DirectoryLookup::new(directory);
            let id = lookup.resolve_account(session, &account)?;
            let accounts = lookup.accounts(session)?;
            if let Some(found) = accounts.iter().find(|a| a.id == id) {
                print!(
                    "{}",
                    format_account_details(found, &settings.currency_symbol)
                );
            }
        }
    }

    Ok(())
}
