//! Display formatting for terminal output
//!
//! Turns expenses and service results into tables and summaries. Nothing
//! here touches storage.

pub mod expense;
pub mod format;
pub mod report;

pub use expense::{format_expense_details, format_expense_list};
pub use report::{
    format_annual_report, format_category_report, format_goal_list, format_month_report,
};
