//! Expense dashboard - monthly expense tracking with goals and income
//!
//! Records fixed and variable expenses per month and category, keeps one
//! spending goal per month and a monthly income figure, and derives the
//! totals, goal comparisons and annual summaries a dashboard shows.
//!
//! # Architecture
//!
//! - `config`: paths and user settings
//! - `error`: error types
//! - `models`: months, kinds, categories, money, expenses and goals
//! - `storage`: the transactional ledger (expenses, config, goals)
//! - `audit`: append-only log of committed mutations
//! - `services`: aggregations, income and CSV import
//! - `export`: CSV, JSON and YAML export
//! - `display`: terminal formatting
//! - `cli`: command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_dashboard::config::DashboardPaths;
//! use expense_dashboard::models::{Category, ExpenseKind, Money, Month, NewExpense};
//! use expense_dashboard::services::SummaryService;
//! use expense_dashboard::storage::Storage;
//!
//! let storage = Storage::open(DashboardPaths::new()?)?;
//! storage.add_expense(NewExpense::new(
//!     Month::January,
//!     ExpenseKind::Fixed,
//!     Category::Housing,
//!     "Aluguel",
//!     Money::from_cents(150000),
//! ))?;
//! let totals = SummaryService::new(&storage).sum_by_kind(Month::January)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{DashboardError, DashboardResult};
