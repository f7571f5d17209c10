use anyhow::Result;
use clap::{Parser, Subcommand};

use simplebank::cli::{
    handle_account_command, handle_log_command, handle_shell, handle_transaction_command,
    handle_view_all, AccountCommands, SessionArgs, TransactionCommands,
};
use simplebank::config::{BankPaths, Settings};
use simplebank::storage::initialize_ledger;

#[derive(Parser)]
#[command(
    name = "simplebank",
    author = "Kaylee Beyene",
    version,
    about = "Fixed-width account ledger with session-capped banking transactions",
    long_about = "simplebank keeps bank accounts in a fixed-width text ledger. \
                  Every command logs in as an account, performs one operation \
                  under per-session limits, and records it in the transaction log."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the ledger and the built-in administrator account
    Init,

    /// Show current configuration and paths
    Config,

    /// List every account (administrators only)
    #[command(alias = "view-all")]
    Accounts {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Show recent transaction log records
    Log {
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Interactive numbered menu
    Shell {
        #[command(flatten)]
        session: SessionArgs,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = BankPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing simplebank at: {}", paths.base_dir().display());
            let created = initialize_ledger(&paths)?;
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("Initialization complete!");
            match created {
                Some(admin) => {
                    println!();
                    println!(
                        "Administrator account {} ({}) created with balance {}.",
                        admin.number.padded(5),
                        admin.name,
                        admin.balance.format_with_symbol("$")
                    );
                    println!("Run 'simplebank accounts --as 1 --name Admin' to list accounts.");
                }
                None => println!("Existing ledger left unchanged."),
            }
        }
        Some(Commands::Config) => {
            println!("simplebank Configuration");
            println!("========================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Ledger:           {}", paths.ledger_file().display());
            println!("Account types:    {}", paths.account_types_file().display());
            println!("Transaction log:  {}", paths.audit_log().display());
            println!("Settings:         {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Admin policy:        {:?}", settings.admin_policy);
            println!(
                "  Withdrawal limit:    {}",
                settings.limits.withdraw.format_with_symbol("$")
            );
            println!(
                "  Transfer limit:      {}",
                settings.limits.transfer.format_with_symbol("$")
            );
            println!(
                "  Bill payment limit:  {}",
                settings.limits.bill_payment.format_with_symbol("$")
            );
            println!("  Payees:              {}", settings.payees.entries().join("; "));
            println!("  Transaction log:     {}", if settings.audit_enabled { "on" } else { "off" });
        }
        Some(Commands::Accounts { session }) => {
            handle_view_all(&paths, &settings, &session)?;
        }
        Some(Commands::Account(cmd)) => {
            handle_account_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Log { limit }) => {
            handle_log_command(&paths, limit)?;
        }
        Some(Commands::Shell { session }) => {
            handle_shell(&paths, &settings, &session)?;
        }
        None => {
            println!("simplebank - fixed-width account ledger");
            println!();
            println!("Run 'simplebank init' to create a ledger.");
            println!("Run 'simplebank --help' for usage information.");
        }
    }

    Ok(())
}
