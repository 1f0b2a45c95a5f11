//! Expense table
//!
//! Rows are kept in insertion order. The ID counter is persisted alongside
//! the rows so IDs keep increasing across clears, imports and restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId, ExpenseUpdate, Month, NewExpense};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseTable {
    next_id: ExpenseId,
    #[serde(default)]
    rows: Vec<Expense>,
}

impl Default for ExpenseTable {
    fn default() -> Self {
        Self {
            next_id: ExpenseId::new(1),
            rows: Vec::new(),
        }
    }
}

impl ExpenseTable {
    /// Restore the counter invariant after loading from disk
    pub(crate) fn repair_counter(&mut self) {
        if let Some(max) = self.rows.iter().map(|e| e.id).max() {
            if self.next_id <= max {
                self.next_id = max.next();
            }
        }
    }

    /// Insert a (pre-validated) draft under the next ID
    pub fn insert(&mut self, draft: NewExpense, now: DateTime<Utc>) -> Expense {
        let id = self.next_id;
        self.next_id = id.next();
        let expense = Expense::from_new(id, draft, now);
        self.rows.push(expense.clone());
        expense
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.rows.iter().find(|e| e.id == id)
    }

    pub fn remove(&mut self, id: ExpenseId) -> Option<Expense> {
        let index = self.rows.iter().position(|e| e.id == id)?;
        Some(self.rows.remove(index))
    }

    /// Overwrite the mutable fields; returns (before, after) if found
    pub fn update(
        &mut self,
        id: ExpenseId,
        update: &ExpenseUpdate,
    ) -> Option<(Expense, Expense)> {
        let row = self.rows.iter_mut().find(|e| e.id == id)?;
        let before = row.clone();
        row.apply(update);
        Some((before, row.clone()))
    }

    /// Remove every row, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.rows.len();
        self.rows.clear();
        count
    }

    /// Iterate rows ordered by creation time, then ID
    pub fn ordered(&self) -> Vec<&Expense> {
        let mut rows: Vec<&Expense> = self.rows.iter().collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        rows
    }

    pub fn for_month(&self, month: Month) -> Vec<&Expense> {
        self.ordered()
            .into_iter()
            .filter(|e| e.month == month)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn next_id(&self) -> ExpenseId {
        self.next_id
    }
}
