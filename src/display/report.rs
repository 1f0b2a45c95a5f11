//! Report formatting for terminal output

use std::collections::BTreeMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Money, Month};
use crate::services::{
    AnnualTotals, CategorySpending, GoalBand, GoalStatus, IncomeUsage, KindTotals, MonthSummary,
    UsageLevel,
};

use super::format::{double_separator, format_bar, format_percentage, separator};

const WIDTH: usize = 52;

fn usage_label(level: UsageLevel) -> &'static str {
    match level {
        UsageLevel::Controlled => "controlled",
        UsageLevel::Elevated => "elevated",
        UsageLevel::OverIncome => "over income",
    }
}

fn band_label(band: GoalBand) -> &'static str {
    match band {
        GoalBand::OnTrack => "on track",
        GoalBand::Near => "near limit",
        GoalBand::Over => "over goal",
    }
}

/// Month summary: kind totals, goal gauge and income usage
pub fn format_month_report(
    month: Month,
    totals: &KindTotals,
    goal: Option<&GoalStatus>,
    usage: &IncomeUsage,
    symbol: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Summary for {}\n", month));
    out.push_str(&double_separator(WIDTH));
    out.push('\n');

    out.push_str(&format!("Fixed:      {:>20}\n", totals.fixed.format_with_symbol(symbol)));
    out.push_str(&format!(
        "Variable:   {:>20}\n",
        totals.variable.format_with_symbol(symbol)
    ));
    out.push_str(&format!("Total:      {:>20}\n", totals.total.format_with_symbol(symbol)));
    out.push_str(&separator(WIDTH));
    out.push('\n');

    match goal {
        Some(status) => {
            out.push_str(&format!(
                "Goal:       {:>20}  [{}] {}\n",
                status.target.format_with_symbol(symbol),
                format_bar(status.spent, status.target, 10),
                format_percentage(status.percent_used())
            ));
            out.push_str(&format!(
                "Remaining:  {:>20}  ({})\n",
                status.remaining.format_with_symbol(symbol),
                band_label(status.band())
            ));
            if status.exceeded {
                out.push_str(&format!(
                    "Goal exceeded by {}\n",
                    status.remaining.abs().format_with_symbol(symbol)
                ));
            }
        }
        None => out.push_str("Goal:       not set\n"),
    }

    out.push_str(&separator(WIDTH));
    out.push('\n');
    out.push_str(&format!("Income:     {:>20}\n", usage.income.format_with_symbol(symbol)));
    out.push_str(&format!("Balance:    {:>20}\n", usage.balance.format_with_symbol(symbol)));
    match usage.percent_used {
        Some(pct) => out.push_str(&format!(
            "Used:       {:>20}  ({})\n",
            format_percentage(pct),
            usage_label(usage.level)
        )),
        None => out.push_str("Used:       no income set\n"),
    }

    out
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Category breakdown of one month, largest first
pub fn format_category_report(month: Month, rows: &[CategorySpending], symbol: &str) -> String {
    if rows.is_empty() {
        return format!("No expenses recorded for {}.", month);
    }

    let max = rows.iter().map(|r| r.total).max().unwrap_or_default();
    let table_rows = rows.iter().map(|r| CategoryRow {
        category: r.category.label(),
        count: r.count,
        total: r.total.format_with_symbol(symbol),
        share: format_percentage(r.percentage),
        bar: format_bar(r.total, max, 12),
    });

    format!(
        "Spending by category for {}\n{}",
        month,
        Table::new(table_rows).with(Style::rounded())
    )
}

#[derive(Tabled)]
struct AnnualRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Goal")]
    goal: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Twelve-month table followed by the yearly totals
pub fn format_annual_report(rows: &[MonthSummary], totals: &AnnualTotals, symbol: &str) -> String {
    let table_rows = rows.iter().map(|r| AnnualRow {
        month: r.month.label(),
        spent: r.spent.format_with_symbol(symbol),
        balance: r.balance.format_with_symbol(symbol),
        goal: r
            .goal
            .map(|g| g.format_with_symbol(symbol))
            .unwrap_or_else(|| "-".to_string()),
        status: r.status.label(),
    });

    let mut out = Table::new(table_rows).with(Style::rounded()).to_string();
    out.push('\n');
    out.push_str(&format!(
        "Total spent:   {:>20}\n",
        totals.total_spent.format_with_symbol(symbol)
    ));
    out.push_str(&format!(
        "Total income:  {:>20}\n",
        totals.total_income.format_with_symbol(symbol)
    ));
    out.push_str(&format!(
        "Balance:       {:>20}\n",
        totals.total_balance.format_with_symbol(symbol)
    ));
    out
}

/// One line per month that has a goal
pub fn format_goal_list(goals: &BTreeMap<Month, Money>, symbol: &str) -> String {
    if goals.is_empty() {
        return "No goals set.".to_string();
    }

    goals
        .iter()
        .map(|(month, target)| {
            format!("{:<10} {:>16}", month.label(), target.format_with_symbol(symbol))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
