use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_dashboard::cli::{
    handle_data_command, handle_expense_command, handle_goal_command, handle_history_command,
    handle_income_command, handle_report_command, DataCommands, ExpenseCommands, GoalCommands,
    IncomeCommands, ReportCommands,
};
use expense_dashboard::config::paths::DATA_DIR_ENV;
use expense_dashboard::config::{DashboardPaths, Settings};
use expense_dashboard::storage::Storage;

#[derive(Parser)]
#[command(
    name = "dashboard",
    version,
    about = "Monthly expense tracking with goals and income summaries",
    long_about = "Record fixed and variable expenses per month and category, set a \
                  spending goal for each month, and compare what you spend against \
                  your monthly income."
)]
struct Cli {
    /// Directory holding settings, the ledger and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Monthly goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Monthly income commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Summaries and breakdowns
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export, import and reset
    #[command(subcommand)]
    Data(DataCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("expense_dashboard={}", settings.log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => DashboardPaths::with_base_dir(dir),
        None => DashboardPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings);

    let storage = Storage::open_with_settings(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Data(cmd)) => handle_data_command(&storage, cmd)?,
        Some(Commands::History { count }) => handle_history_command(&storage, count)?,
        Some(Commands::Config) => {
            println!("Expense Dashboard Configuration");
            println!("===============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Warning threshold: {}%", settings.warning_threshold_percent);
            println!("  Log level:         {}", settings.log_level);
            println!("  Audit enabled:     {}", settings.audit_enabled);
        }
        None => {
            println!("Expense Dashboard - monthly expenses, goals and income");
            println!();
            println!("Run 'dashboard --help' for usage information.");
        }
    }

    Ok(())
}
