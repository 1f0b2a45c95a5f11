//! Report CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_annual_report, format_category_report, format_month_report};
use crate::error::DashboardResult;
use crate::services::{IncomeService, SummaryService};
use crate::storage::Storage;

use super::parse_month;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals, goal and income usage for one month
    Month { month: String },

    /// Spending per category for one month
    Categories { month: String },

    /// All twelve months with yearly totals
    Year,
}

pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> DashboardResult<()> {
    let summary =
        SummaryService::new(storage).with_warning_threshold(settings.warning_threshold_percent);
    let income = IncomeService::new(storage).income()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Month { month } => {
            let month = parse_month(&month)?;
            let totals = summary.sum_by_kind(month)?;
            let goal = summary.goal_status(month)?;
            let usage = summary.income_usage(month, income)?;
            print!(
                "{}",
                format_month_report(month, &totals, goal.as_ref(), &usage, symbol)
            );
        }

        ReportCommands::Categories { month } => {
            let month = parse_month(&month)?;
            let rows = summary.spending_by_category(month)?;
            println!("{}", format_category_report(month, &rows, symbol));
        }

        ReportCommands::Year => {
            let rows = summary.annual_summary(income)?;
            let totals = summary.annual_totals(income)?;
            print!("{}", format_annual_report(&rows, &totals, symbol));

            let flagged: Vec<_> = summary
                .month_overview()?
                .into_iter()
                .filter(|m| m.goal_exceeded)
                .map(|m| m.month.label())
                .collect();
            if !flagged.is_empty() {
                println!("Goals exceeded in: {}", flagged.join(", "));
            }
        }
    }

    Ok(())
}
