//! Goal table: at most one goal per month
//!
//! Persisted as a list (sorted by month) and indexed by month in memory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Money, Month, MonthlyGoal};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<MonthlyGoal>", into = "Vec<MonthlyGoal>")]
pub struct GoalTable {
    by_month: BTreeMap<Month, MonthlyGoal>,
}

impl From<Vec<MonthlyGoal>> for GoalTable {
    fn from(goals: Vec<MonthlyGoal>) -> Self {
        // Later entries win, matching upsert semantics
        Self {
            by_month: goals.into_iter().map(|g| (g.month, g)).collect(),
        }
    }
}

impl From<GoalTable> for Vec<MonthlyGoal> {
    fn from(table: GoalTable) -> Self {
        table.by_month.into_values().collect()
    }
}

impl GoalTable {
    /// Insert or overwrite the goal for its month; returns the previous goal
    pub fn upsert(&mut self, goal: MonthlyGoal) -> Option<MonthlyGoal> {
        self.by_month.insert(goal.month, goal)
    }

    pub fn get(&self, month: Month) -> Option<&MonthlyGoal> {
        self.by_month.get(&month)
    }

    /// Month -> target snapshot, in calendar order
    pub fn targets(&self) -> BTreeMap<Month, Money> {
        self.by_month
            .iter()
            .map(|(month, goal)| (*month, goal.target))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlyGoal> {
        self.by_month.values()
    }

    pub fn clear(&mut self) -> usize {
        let count = self.by_month.len();
        self.by_month.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.by_month.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_month.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_is_last_write_wins() {
        let mut table = GoalTable::default();
        assert!(table
            .upsert(MonthlyGoal::new(Month::January, Money::from_cents(100000)))
            .is_none());
        let previous = table
            .upsert(MonthlyGoal::new(Month::January, Money::from_cents(80000)))
            .unwrap();

        assert_eq!(previous.target.cents(), 100000);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Month::January).unwrap().target.cents(), 80000);
    }

    #[test]
    fn test_serializes_as_sorted_list() {
        let mut table = GoalTable::default();
        table.upsert(MonthlyGoal::new(Month::March, Money::from_cents(300)));
        table.upsert(MonthlyGoal::new(Month::January, Money::from_cents(100)));

        let json = serde_json::to_value(&table).unwrap();
        let list = json.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["month"], "Janeiro");
        assert_eq!(list[1]["month"], "Março");

        let back: GoalTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_duplicate_months_on_disk_collapse() {
        let goals = vec![
            MonthlyGoal::new(Month::June, Money::from_cents(1)),
            MonthlyGoal::new(Month::June, Money::from_cents(2)),
        ];
        let table = GoalTable::from(goals);
        assert_eq!(table.targets().get(&Month::June), Some(&Money::from_cents(2)));
    }
}
