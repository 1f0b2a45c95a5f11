//! Service layer for the expense dashboard
//!
//! Services sit on top of the storage engine: typed access to the income
//! figure, bulk CSV import, and the read-only aggregations that feed the
//! reports.

pub mod import;
pub mod income;
pub mod summary;

pub use import::{parse_csv, ImportService, ImportSummary, ParsedImport};
pub use income::IncomeService;
pub use summary::{
    AnnualTotals, CategorySpending, GoalBand, GoalOutcome, GoalStatus, IncomeUsage, KindTotals,
    MonthOverview, MonthSummary, SummaryService, UsageLevel, DEFAULT_WARNING_THRESHOLD,
};
