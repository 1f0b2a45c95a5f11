//! The persisted ledger document
//!
//! One JSON file holds all three logical tables. It is always read and
//! written as a whole.

use serde::{Deserialize, Serialize};

use super::config_entries::ConfigTable;
use super::expenses::ExpenseTable;
use super::goals::GoalTable;

pub const LEDGER_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub expenses: ExpenseTable,
    #[serde(default)]
    pub config: ConfigTable,
    #[serde(default)]
    pub goals: GoalTable,
}

fn default_schema_version() -> u32 {
    LEDGER_SCHEMA_VERSION
}

impl Default for LedgerData {
    fn default() -> Self {
        Self {
            schema_version: LEDGER_SCHEMA_VERSION,
            expenses: ExpenseTable::default(),
            config: ConfigTable::default(),
            goals: GoalTable::default(),
        }
    }
}

impl LedgerData {
    /// Fix up anything a hand-edited or older document may have broken
    pub(crate) fn normalize(mut self) -> Self {
        self.expenses.repair_counter();
        self
    }
}
