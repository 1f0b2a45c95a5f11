//! CLI command handlers
//!
//! Bridges clap argument parsing with the storage engine and services.
//! Selection state (which month, which expense, whether a reset is
//! confirmed) arrives as arguments on every call; nothing is remembered
//! between invocations except the ledger itself.

pub mod data;
pub mod expense;
pub mod goal;
pub mod history;
pub mod income;
pub mod report;

pub use data::{handle_data_command, DataCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use history::handle_history_command;
pub use income::{handle_income_command, IncomeCommands};
pub use report::{handle_report_command, ReportCommands};

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Category, ExpenseKind, Money, Month};

pub(crate) fn parse_month(input: &str) -> DashboardResult<Month> {
    Month::parse(input).ok_or_else(|| {
        DashboardError::invalid_field("month", format!("unknown month '{}'", input))
    })
}

pub(crate) fn parse_kind(input: &str) -> DashboardResult<ExpenseKind> {
    ExpenseKind::parse(input).ok_or_else(|| {
        DashboardError::invalid_field(
            "kind",
            format!("expected Fixo or Variável, got '{}'", input),
        )
    })
}

/// Interactive input is strict; only bulk files fall back to "Outros"
pub(crate) fn parse_category(input: Option<&str>) -> DashboardResult<Category> {
    match input {
        None => Ok(Category::Other),
        Some(raw) => Category::parse(raw).ok_or_else(|| {
            DashboardError::invalid_field("category", format!("unknown category '{}'", raw))
        }),
    }
}

pub(crate) fn parse_amount(input: &str) -> DashboardResult<Money> {
    Money::parse(input).map_err(|e| DashboardError::invalid_field("amount", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_month("marco").unwrap(), Month::March);
        assert!(parse_month("Smarch").unwrap_err().is_validation());

        assert_eq!(parse_kind("variavel").unwrap(), ExpenseKind::Variable);
        assert!(parse_kind("monthly").is_err());

        assert_eq!(parse_category(None).unwrap(), Category::Other);
        assert_eq!(parse_category(Some("saude")).unwrap(), Category::Health);
        assert!(parse_category(Some("gadgets")).is_err());

        assert_eq!(parse_amount("R$ 1.500,00").unwrap(), Money::from_cents(150000));
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }
}
