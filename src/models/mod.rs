//! Core data models for the expense dashboard
//!
//! Closed enumerations for months, kinds and categories, fixed-point money,
//! and the expense and goal records the storage engine persists.

pub mod category;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod money;
pub mod month;
pub mod text;

pub use category::Category;
pub use expense::{Expense, ExpenseKind, ExpenseUpdate, ExpenseValidationError, NewExpense};
pub use goal::{GoalValidationError, MonthlyGoal};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use month::Month;
