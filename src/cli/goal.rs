//! Goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_goal_list;
use crate::error::DashboardResult;
use crate::services::SummaryService;
use crate::storage::Storage;

use super::{parse_amount, parse_month};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set (or replace) the spending goal of a month
    Set { month: String, amount: String },

    /// Compare a month's spending to its goal
    Show { month: String },

    /// List every month that has a goal
    List,
}

pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> DashboardResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::Set { month, amount } => {
            let month = parse_month(&month)?;
            let target = parse_amount(&amount)?;
            storage.save_goal(month, target)?;
            println!("Goal for {} set to {}.", month, target.format_with_symbol(symbol));
        }

        GoalCommands::Show { month } => {
            let month = parse_month(&month)?;
            match SummaryService::new(storage).goal_status(month)? {
                Some(status) => {
                    println!("Goal for {}", month);
                    println!("  Target:    {}", status.target.format_with_symbol(symbol));
                    println!("  Spent:     {}", status.spent.format_with_symbol(symbol));
                    println!("  Remaining: {}", status.remaining.format_with_symbol(symbol));
                    if status.exceeded {
                        println!("  Goal exceeded.");
                    }
                }
                None => println!("No goal set for {}.", month),
            }
        }

        GoalCommands::List => {
            println!("{}", format_goal_list(&storage.all_goals()?, symbol));
        }
    }

    Ok(())
}
