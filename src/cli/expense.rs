//! Expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::DashboardResult;
use crate::models::{ExpenseId, ExpenseUpdate, NewExpense};
use crate::storage::Storage;

use super::{parse_amount, parse_category, parse_kind, parse_month};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Month (e.g. "Janeiro", "march" or "3")
        month: String,
        /// Fixo/fixed or Variável/variable
        kind: String,
        /// What the money went to
        description: String,
        /// Amount (e.g. "1500", "1.500,00")
        amount: String,
        /// Category (defaults to Outros)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List expenses, optionally for one month
    List {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show one expense
    Show {
        /// Expense ID (e.g. "3" or "#3")
        id: ExpenseId,
    },

    /// Change kind, category, description or amount of an expense
    Edit {
        id: ExpenseId,
        #[arg(short, long)]
        kind: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Remove an expense (unknown IDs are ignored)
    Remove { id: ExpenseId },

    /// Delete every expense; goals and income are kept
    Clear {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> DashboardResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            month,
            kind,
            description,
            amount,
            category,
        } => {
            let draft = NewExpense::new(
                parse_month(&month)?,
                parse_kind(&kind)?,
                parse_category(category.as_deref())?,
                description,
                parse_amount(&amount)?,
            );
            let id = storage.add_expense(draft)?;
            if let Some(expense) = storage.get_expense(id)? {
                println!(
                    "Added expense {}: {} {}",
                    id,
                    expense.label(),
                    expense.amount.format_with_symbol(symbol)
                );
            }
        }

        ExpenseCommands::List { month } => {
            let expenses = match month {
                Some(m) => storage.expenses_for_month(parse_month(&m)?)?,
                None => storage.all_expenses()?,
            };
            println!("{}", format_expense_list(&expenses, symbol));
        }

        ExpenseCommands::Show { id } => match storage.get_expense(id)? {
            Some(expense) => print!("{}", format_expense_details(&expense, symbol)),
            None => println!("No expense {}.", id),
        },

        ExpenseCommands::Edit {
            id,
            kind,
            category,
            description,
            amount,
        } => {
            let Some(current) = storage.get_expense(id)? else {
                println!("No expense {}; nothing changed.", id);
                return Ok(());
            };

            let mut update = ExpenseUpdate::from_expense(&current);
            if let Some(k) = kind {
                update.kind = parse_kind(&k)?;
            }
            if category.is_some() {
                update.category = parse_category(category.as_deref())?;
            }
            if let Some(d) = description {
                update.description = d;
            }
            if let Some(a) = amount {
                update.amount = parse_amount(&a)?;
            }

            if storage.edit_expense(id, update)? {
                println!("Updated expense {}.", id);
            } else {
                println!("No expense {}; nothing changed.", id);
            }
        }

        ExpenseCommands::Remove { id } => {
            if storage.remove_expense(id)? {
                println!("Removed expense {}.", id);
            } else {
                println!("No expense {}; nothing removed.", id);
            }
        }

        ExpenseCommands::Clear { yes } => {
            if !yes {
                println!("This deletes every expense. Re-run with --yes to confirm.");
                return Ok(());
            }
            let removed = storage.clear_expenses()?;
            println!("Removed {} expenses.", removed);
        }
    }

    Ok(())
}
