//! Expense model
//!
//! A single spending entry tied to one month, one kind (fixed or variable)
//! and one category. Only kind, category, description and amount can change
//! after creation; id, month and creation time are fixed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;
use super::month::Month;
use super::text::fold_label;

/// Expense classification by recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseKind {
    #[serde(rename = "Fixo")]
    Fixed,
    #[serde(rename = "Variável")]
    Variable,
}

impl ExpenseKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixo",
            Self::Variable => "Variável",
        }
    }

    /// Parse "Fixo"/"Variável" or "fixed"/"variable", ignoring case and accents
    pub fn parse(s: &str) -> Option<Self> {
        match fold_label(s).as_str() {
            "fixo" | "fixed" | "f" => Some(Self::Fixed),
            "variavel" | "variable" | "v" => Some(Self::Variable),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description: must not be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "amount: must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "amount: must not exceed {} (got {})", Money::MAX, amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

fn check_fields(description: &str, amount: Money) -> Result<(), ExpenseValidationError> {
    if description.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyDescription);
    }
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    if amount.exceeds_max() {
        return Err(ExpenseValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

/// A persisted expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub month: Month,
    pub kind: ExpenseKind,
    #[serde(default)]
    pub category: Category,
    pub description: String,
    pub amount: Money,
    /// Insertion time, used only for stable ordering
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Materialize a draft under an engine-assigned ID
    pub fn from_new(id: ExpenseId, draft: NewExpense, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            month: draft.month,
            kind: draft.kind,
            category: draft.category,
            description: draft.description.trim().to_string(),
            amount: draft.amount,
            created_at,
        }
    }

    /// Overwrite the mutable fields
    pub fn apply(&mut self, update: &ExpenseUpdate) {
        self.kind = update.kind;
        self.category = update.category;
        self.description = update.description.trim().to_string();
        self.amount = update.amount;
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        check_fields(&self.description, self.amount)
    }

    /// The draft this record would be re-created from (ID and timestamp dropped)
    pub fn to_new(&self) -> NewExpense {
        NewExpense {
            month: self.month,
            kind: self.kind,
            category: self.category,
            description: self.description.clone(),
            amount: self.amount,
        }
    }

    /// Short human label, e.g. `"Aluguel (Moradia)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.description, self.category)
    }
}

/// Input for adding or importing an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub month: Month,
    pub kind: ExpenseKind,
    pub category: Category,
    pub description: String,
    pub amount: Money,
}

impl NewExpense {
    pub fn new(
        month: Month,
        kind: ExpenseKind,
        category: Category,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            month,
            kind,
            category,
            description: description.into(),
            amount,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        check_fields(&self.description, self.amount)
    }
}

/// Replacement values for the mutable fields of an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseUpdate {
    pub kind: ExpenseKind,
    pub category: Category,
    pub description: String,
    pub amount: Money,
}

impl ExpenseUpdate {
    pub fn new(
        kind: ExpenseKind,
        category: Category,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            kind,
            category,
            description: description.into(),
            amount,
        }
    }

    /// Start from an existing record's current values
    pub fn from_expense(expense: &Expense) -> Self {
        Self::new(
            expense.kind,
            expense.category,
            expense.description.clone(),
            expense.amount,
        )
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        check_fields(&self.description, self.amount)
    }
}
