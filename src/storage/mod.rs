//! Storage engine for the expense dashboard
//!
//! A single long-lived handle owns the ledger (expenses, config, goals).
//! Every mutating call runs as one transaction: the current snapshot is
//! cloned, the clone is changed and written atomically to disk, and only
//! then swapped in. Readers never see a half-applied import or clear, and a
//! failed write leaves both memory and disk untouched.
//!
//! Committed mutations are appended to the audit log afterwards. Audit
//! failures are logged and never undo a commit.

mod config_entries;
mod expenses;
pub mod file_io;
mod goals;
mod ledger;

pub use config_entries::{ConfigTable, INCOME_KEY};
pub use expenses::ExpenseTable;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalTable;
pub use ledger::{LedgerData, LEDGER_SCHEMA_VERSION};

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::audit::{describe_changes, AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::{DashboardPaths, Settings};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Expense, ExpenseId, ExpenseUpdate, Money, Month, MonthlyGoal, NewExpense};

/// Check a monthly income before it is stored
pub fn validate_income(income: Money) -> DashboardResult<()> {
    if income.is_negative() {
        return Err(DashboardError::invalid_field(
            INCOME_KEY,
            format!("must not be negative (got {})", income),
        ));
    }
    if income.exceeds_max() {
        return Err(DashboardError::invalid_field(
            INCOME_KEY,
            format!("must not exceed {} (got {})", Money::MAX, income),
        ));
    }
    Ok(())
}

/// Main storage handle
pub struct Storage {
    paths: DashboardPaths,
    ledger: RwLock<LedgerData>,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Open (or create) the ledger under `paths` with default settings
    pub fn open(paths: DashboardPaths) -> DashboardResult<Self> {
        Self::open_with_settings(paths, &Settings::default())
    }

    pub fn open_with_settings(paths: DashboardPaths, settings: &Settings) -> DashboardResult<Self> {
        paths.ensure_directories()?;

        let ledger_file = paths.ledger_file();
        let data: LedgerData = read_json(&ledger_file)?;
        let data = data.normalize();
        debug!(
            path = %ledger_file.display(),
            expenses = data.expenses.len(),
            goals = data.goals.len(),
            "opened ledger"
        );

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            paths,
            ledger: RwLock::new(data),
            audit,
        })
    }

    pub fn paths(&self) -> &DashboardPaths {
        &self.paths
    }

    /// The audit logger, when auditing is enabled
    pub fn audit_log(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    fn read_guard(&self) -> DashboardResult<RwLockReadGuard<'_, LedgerData>> {
        self.ledger
            .read()
            .map_err(|_| DashboardError::Storage("ledger lock poisoned".into()))
    }

    fn write_guard(&self) -> DashboardResult<RwLockWriteGuard<'_, LedgerData>> {
        self.ledger
            .write()
            .map_err(|_| DashboardError::Storage("ledger lock poisoned".into()))
    }

    fn read<T>(&self, f: impl FnOnce(&LedgerData) -> T) -> DashboardResult<T> {
        let guard = self.read_guard()?;
        Ok(f(&guard))
    }

    /// Run `op` against a staged copy of the ledger and commit it
    ///
    /// If `op` fails or the write fails, the live ledger is unchanged.
    /// Unchanged snapshots are not rewritten.
    fn commit<T>(
        &self,
        op: impl FnOnce(&mut LedgerData) -> DashboardResult<T>,
    ) -> DashboardResult<T> {
        let mut live = self.write_guard()?;
        let mut staged = live.clone();
        let value = op(&mut staged)?;

        if staged != *live {
            write_json_atomic(self.paths.ledger_file(), &staged)?;
            *live = staged;
            debug!("ledger committed");
        }

        Ok(value)
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log(&entry) {
                warn!(error = %e, operation = %entry.operation, "failed to write audit entry");
            }
        }
    }

    // ----- expenses -----

    /// Validate and insert an expense, returning its new ID
    pub fn add_expense(&self, draft: NewExpense) -> DashboardResult<ExpenseId> {
        draft.validate()?;

        let expense = self.commit(|ledger| Ok(ledger.expenses.insert(draft, Utc::now())))?;
        info!(id = %expense.id, month = %expense.month, amount = %expense.amount, "expense added");

        self.record(AuditEntry::create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.label()),
            &expense,
        ));
        Ok(expense.id)
    }

    /// Remove an expense; returns whether anything was removed
    ///
    /// An unknown ID is a no-op, not an error.
    pub fn remove_expense(&self, id: ExpenseId) -> DashboardResult<bool> {
        let removed = self.commit(|ledger| Ok(ledger.expenses.remove(id)))?;

        match removed {
            Some(expense) => {
                info!(id = %id, "expense removed");
                self.record(AuditEntry::delete(
                    EntityType::Expense,
                    id.to_string(),
                    Some(expense.label()),
                    &expense,
                ));
                Ok(true)
            }
            None => {
                debug!(id = %id, "remove skipped, no such expense");
                Ok(false)
            }
        }
    }

    /// Overwrite kind, category, description and amount of an expense
    ///
    /// The update is validated even when the ID is unknown. An unknown ID is
    /// then a no-op; returns whether a record was found.
    pub fn edit_expense(&self, id: ExpenseId, update: ExpenseUpdate) -> DashboardResult<bool> {
        update.validate()?;

        let changed = self.commit(|ledger| Ok(ledger.expenses.update(id, &update)))?;

        let Some((before, after)) = changed else {
            debug!(id = %id, "edit skipped, no such expense");
            return Ok(false);
        };

        if before != after {
            info!(id = %id, "expense updated");
            self.record(AuditEntry::update(
                EntityType::Expense,
                id.to_string(),
                Some(after.label()),
                describe_changes(&before, &after),
            ));
        }
        Ok(true)
    }

    pub fn get_expense(&self, id: ExpenseId) -> DashboardResult<Option<Expense>> {
        self.read(|ledger| ledger.expenses.get(id).cloned())
    }

    /// Expenses of one month, oldest first
    pub fn expenses_for_month(&self, month: Month) -> DashboardResult<Vec<Expense>> {
        self.read(|ledger| {
            ledger
                .expenses
                .for_month(month)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Every expense, oldest first
    pub fn all_expenses(&self) -> DashboardResult<Vec<Expense>> {
        self.read(|ledger| ledger.expenses.ordered().into_iter().cloned().collect())
    }

    /// Delete every expense; goals and config are kept
    pub fn clear_expenses(&self) -> DashboardResult<usize> {
        let removed = self.commit(|ledger| Ok(ledger.expenses.clear()))?;
        info!(removed, "expenses cleared");

        if removed > 0 {
            self.record(AuditEntry::bulk(
                Operation::Clear,
                EntityType::Expense,
                format!("removed {} expenses", removed),
            ));
        }
        Ok(removed)
    }

    /// Replace the whole expense set with `records`
    ///
    /// Every record is validated before anything changes. Fresh IDs are
    /// assigned; the replacement is all-or-nothing.
    pub fn import_expenses(&self, records: Vec<NewExpense>) -> DashboardResult<usize> {
        self.import_with_income(records, None)
    }

    /// Replace the expense set and, if given, the income in one transaction
    pub fn import_with_income(
        &self,
        records: Vec<NewExpense>,
        income: Option<Money>,
    ) -> DashboardResult<usize> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|e| DashboardError::Validation(format!("record {}: {}", index + 1, e)))?;
        }
        if let Some(income) = income {
            validate_income(income)?;
        }

        let imported = records.len();
        let replaced = self.commit(|ledger| {
            let now = Utc::now();
            let replaced = ledger.expenses.clear();
            for record in records {
                ledger.expenses.insert(record, now);
            }
            if let Some(income) = income {
                ledger.config.set(INCOME_KEY, &income.to_string());
            }
            Ok(replaced)
        })?;

        info!(replaced, imported, income = income.is_some(), "expenses imported");
        let mut summary = format!("replaced {} expenses with {}", replaced, imported);
        if let Some(income) = income {
            summary.push_str(&format!("; income set to {}", income));
        }
        self.record(AuditEntry::bulk(Operation::Import, EntityType::Expense, summary));

        Ok(imported)
    }

    // ----- config -----

    /// Upsert a config entry
    pub fn save_config(&self, key: &str, value: &str) -> DashboardResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DashboardError::invalid_field("key", "must not be empty"));
        }

        let previous = self.commit(|ledger| Ok(ledger.config.set(key, value)))?;
        match previous {
            Some(old) if old == value => {}
            Some(old) => {
                debug!(key, "config updated");
                self.record(AuditEntry::update(
                    EntityType::Config,
                    key,
                    None,
                    Some(format!("{}: {} -> {}", key, old, value)),
                ));
            }
            None => {
                debug!(key, "config created");
                self.record(AuditEntry::create(
                    EntityType::Config,
                    key,
                    None,
                    &value.to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Read a config entry, falling back to `default`
    ///
    /// Keys are trimmed the same way `save_config` trims them.
    pub fn get_config(&self, key: &str, default: &str) -> DashboardResult<String> {
        let key = key.trim();
        self.read(|ledger| ledger.config.get(key).unwrap_or(default).to_string())
    }

    pub fn config_entries(&self) -> DashboardResult<BTreeMap<String, String>> {
        self.read(|ledger| ledger.config.entries().clone())
    }

    // ----- goals -----

    /// Upsert the goal for `month` (last write wins)
    pub fn save_goal(&self, month: Month, target: Money) -> DashboardResult<()> {
        let goal = MonthlyGoal::new(month, target);
        goal.validate()?;

        let previous = self.commit(|ledger| Ok(ledger.goals.upsert(goal.clone())))?;
        info!(month = %month, target = %target, "goal saved");

        let entry = match previous {
            Some(old) => AuditEntry::update(
                EntityType::Goal,
                month.label(),
                None,
                Some(format!("target: {} -> {}", old.target, goal.target)),
            ),
            None => AuditEntry::create(EntityType::Goal, month.label(), None, &goal),
        };
        self.record(entry);
        Ok(())
    }

    pub fn get_goal(&self, month: Month) -> DashboardResult<Option<Money>> {
        self.read(|ledger| ledger.goals.get(month).map(|g| g.target))
    }

    /// Month -> target for every month that has a goal
    pub fn all_goals(&self) -> DashboardResult<BTreeMap<Month, Money>> {
        self.read(|ledger| ledger.goals.targets())
    }

    // ----- whole ledger -----

    /// Full reset: expenses, config and goals
    ///
    /// The ID counter is kept so IDs are still never reused.
    pub fn clear_all(&self) -> DashboardResult<()> {
        let (expenses, config, goals) = self.commit(|ledger| {
            Ok((
                ledger.expenses.clear(),
                ledger.config.clear(),
                ledger.goals.clear(),
            ))
        })?;
        info!(expenses, config, goals, "ledger reset");

        if expenses + config + goals > 0 {
            self.record(AuditEntry::bulk(
                Operation::Clear,
                EntityType::Ledger,
                format!(
                    "removed {} expenses, {} config entries, {} goals",
                    expenses, config, goals
                ),
            ));
        }
        Ok(())
    }

    /// A consistent copy of the whole ledger
    pub fn snapshot(&self) -> DashboardResult<LedgerData> {
        self.read(LedgerData::clone)
    }
}
