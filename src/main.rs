use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fintrack::cli::{
    handle_budget_command, handle_dashboard_command, handle_statement_command,
    handle_transaction_command, BudgetCommands, DashboardArgs, StatementArgs, TransactionCommands,
};
use fintrack::config::{paths::FinancePaths, settings::Settings};
use fintrack::storage::Storage;

const LOG_ENV: &str = "FINTRACK_LOG";
const LOG_FORMAT_ENV: &str = "FINTRACK_LOG_FORMAT";

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Terminal personal finance tracker",
    long_about = "fintrack records income and expenses, keeps a running balance, \
                  and tracks spending against per-category budget limits."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show balance, recent transactions and budget progress
    Dashboard(DashboardArgs),

    /// List transactions, optionally filtered
    #[command(alias = "extrato")]
    Statement(StatementArgs),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Create the data directory, settings file and category budgets
    Init,

    /// Show current configuration and paths
    Config,
}

/// Logs go to stderr; stdout is reserved for command output
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "text".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings);

    // Initialize storage; seeds any missing category budgets
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Dashboard(args)) => {
            handle_dashboard_command(&storage, &settings, args)?;
        }
        Some(Commands::Statement(args)) => {
            handle_statement_command(&storage, &settings, args)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Initialized fintrack at: {}", paths.base_dir().display());
            println!();
            println!("Budgets were created for every category, all with a limit of 0:");
            println!("  Food, Housing, Transport, Leisure, Health, Salary, Other");
            println!();
            println!("Run 'fintrack budget set <category> <limit>' to start tracking one.");
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Recent transactions: {}", settings.recent_transactions);
            println!("  Log filter:          {}", settings.log_filter);
        }
        None => {
            let args = DashboardArgs {
                recent: None,
                json: false,
            };
            handle_dashboard_command(&storage, &settings, args)?;
        }
    }

    Ok(())
}
