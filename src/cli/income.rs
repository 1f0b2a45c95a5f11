//! Income CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::DashboardResult;
use crate::services::IncomeService;
use crate::storage::Storage;

use super::parse_amount;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Set the monthly income (e.g. "4500" or "4.500,00")
    Set { amount: String },

    /// Show the monthly income
    Show,
}

pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> DashboardResult<()> {
    let service = IncomeService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::Set { amount } => {
            let amount = parse_amount(&amount)?;
            service.set_income(amount)?;
            println!("Monthly income set to {}.", amount.format_with_symbol(symbol));
        }
        IncomeCommands::Show => {
            let income = service.income()?;
            if income.is_zero() {
                println!("No income set. Use 'dashboard income set <amount>'.");
            } else {
                println!("Monthly income: {}", income.format_with_symbol(symbol));
                println!("Yearly income:  {}", income.times(12).format_with_symbol(symbol));
            }
        }
    }

    Ok(())
}
