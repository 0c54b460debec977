use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance::cli::{
    handle_account_command, handle_audit_command, handle_category_command,
    handle_transaction_command, handle_transfer_command, AccountCommands, AuditArgs,
    CategoryCommands, TransactionCommands, TransferArgs,
};
use finance::config::{FinancePaths, Settings};
use finance::display::format_error;
use finance::error::FinanceError;
use finance::ledger::{LocalLedger, Session};
use finance::logging::init_tracing;
use finance::models::UserId;

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Personal finance tracker for accounts, categories, transactions and transfers",
    long_about = "finance records income, expenses and transfers between your accounts. \
                  Every form is validated before anything is written, and each write \
                  is recorded in an audit log."
)]
struct Cli {
    /// User whose ledger is used
    #[arg(long, global = true, env = "FINANCE_USER", default_value = "local")]
    user: String,

    /// Session token sent with every ledger request
    #[arg(long, global = true, env = "FINANCE_TOKEN", hide_env_values = true, default_value = "")]
    token: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Move money between two accounts
    Transfer(TransferArgs),

    /// Show the audit log of your writes
    Audit(AuditArgs),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<FinanceError>() {
                Some(error) => eprint!("{}", format_error(error)),
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    let Some(command) = cli.command else {
        println!("finance - personal finance tracker");
        println!();
        println!("Run 'finance --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing finance at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let ledger = LocalLedger::open(&paths)?;
            ledger.storage().save()?;
            println!("Initialization complete!");
            println!();
            println!("Run 'finance account create <NAME> --type BANK' to add your first account.");
            return Ok(());
        }
        Commands::Config => {
            println!("finance configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Earliest date:   {}", settings.earliest_date);
            println!("  Log level:       {}", settings.log_level);
            return Ok(());
        }
        _ => {}
    }

    let ledger = LocalLedger::open(&paths)?;
    let session = Session::new(UserId::new(cli.user), cli.token);

    match command {
        Commands::Account(cmd) => handle_account_command(&ledger, &session, &settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&ledger, &session, cmd)?,
        Commands::Transaction(cmd) => {
            handle_transaction_command(&ledger, &ledger, &session, &settings, cmd)?
        }
        Commands::Transfer(args) => {
            handle_transfer_command(&ledger, &ledger, &session, &settings, args)?
        }
        Commands::Audit(args) => handle_audit_command(&ledger, &session, args)?,
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}
