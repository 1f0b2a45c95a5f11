//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;

use super::format::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table, amounts prefixed with `symbol`
pub fn format_expense_list(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        month: e.month.label(),
        kind: e.kind.label(),
        category: e.category.label(),
        description: truncate(&e.description, 40),
        amount: e.amount.format_with_symbol(symbol),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Multi-line view of one expense
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    format!(
        "Expense {}\n  Month:       {}\n  Kind:        {}\n  Category:    {}\n  \
         Description: {}\n  Amount:      {}\n  Recorded:    {}\n",
        expense.id,
        expense.month,
        expense.kind,
        expense.category,
        expense.description,
        expense.amount.format_with_symbol(symbol),
        expense.created_at.format("%Y-%m-%d %H:%M UTC"),
    )
}
