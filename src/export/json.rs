//! JSON export
//!
//! Full snapshot of the ledger (expenses, goals, config) with schema
//! versioning and a few summary counts.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Expense, Money, MonthlyGoal};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub expenses: Vec<Expense>,
    pub goals: Vec<MonthlyGoal>,
    pub config: BTreeMap<String, String>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub goal_count: usize,
    pub total_spent: Money,
}

impl FullExport {
    /// Build an export from one consistent storage snapshot
    pub fn from_storage(storage: &Storage) -> DashboardResult<Self> {
        let ledger = storage.snapshot()?;

        let expenses: Vec<Expense> = ledger.expenses.ordered().into_iter().cloned().collect();
        let goals: Vec<MonthlyGoal> = ledger.goals.iter().cloned().collect();
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            goal_count: goals.len(),
            total_spent: expenses.iter().map(|e| e.amount).sum(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            goals,
            config: ledger.config.entries().clone(),
            metadata,
        })
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> DashboardResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| DashboardError::Export(e.to_string()))
}
