//! Summary service
//!
//! Read-only aggregations over the ledger: totals by kind, by month and by
//! category, goal comparisons and income usage. Nothing here mutates state;
//! each call works on one consistent snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::DashboardResult;
use crate::models::{Category, Expense, ExpenseKind, Money, Month};
use crate::storage::Storage;

/// Default share of income above which spending is flagged
pub const DEFAULT_WARNING_THRESHOLD: u8 = 80;

/// Goal gauge: at or below this share of the target a month is on track
const GOAL_ON_TRACK_PERCENT: f64 = 80.0;

/// Fixed / variable / grand totals for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct KindTotals {
    pub fixed: Money,
    pub variable: Money,
    pub total: Money,
}

impl KindTotals {
    fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        let mut totals = Self::default();
        for expense in expenses {
            match expense.kind {
                ExpenseKind::Fixed => totals.fixed += expense.amount,
                ExpenseKind::Variable => totals.variable += expense.amount,
            }
        }
        totals.total = totals.fixed + totals.variable;
        totals
    }
}

/// Where a month's spending sits on the goal gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalBand {
    OnTrack,
    Near,
    Over,
}

/// Spending compared to the goal of a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalStatus {
    pub target: Money,
    pub spent: Money,
    /// `target - spent`; negative once the goal is exceeded
    pub remaining: Money,
    pub exceeded: bool,
}

impl GoalStatus {
    fn new(target: Money, spent: Money) -> Self {
        Self {
            target,
            spent,
            remaining: target - spent,
            exceeded: spent > target,
        }
    }

    /// Spent as a percentage of the target
    pub fn percent_used(&self) -> f64 {
        self.spent.percent_of(self.target).unwrap_or(0.0)
    }

    pub fn band(&self) -> GoalBand {
        let percent = self.percent_used();
        if percent <= GOAL_ON_TRACK_PERCENT {
            GoalBand::OnTrack
        } else if percent <= 100.0 {
            GoalBand::Near
        } else {
            GoalBand::Over
        }
    }
}

/// Goal outcome of one month in the annual view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalOutcome {
    Met,
    Exceeded,
    #[serde(rename = "none")]
    NoGoal,
}

impl GoalOutcome {
    fn evaluate(goal: Option<Money>, spent: Money) -> Self {
        match goal {
            Some(target) if spent > target => Self::Exceeded,
            Some(_) => Self::Met,
            None => Self::NoGoal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Met => "met",
            Self::Exceeded => "exceeded",
            Self::NoGoal => "none",
        }
    }
}

impl std::fmt::Display for GoalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the annual summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: Month,
    pub spent: Money,
    /// `income - spent`
    pub balance: Money,
    pub goal: Option<Money>,
    pub status: GoalOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnualTotals {
    pub total_spent: Money,
    /// Monthly income times twelve
    pub total_income: Money,
    pub total_balance: Money,
}

/// Spending on one category within a month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: Category,
    pub total: Money,
    pub count: usize,
    /// Share of the month's total, 0-100
    pub percentage: f64,
}

/// How much of the income a month has used up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UsageLevel {
    /// At or below the warning threshold
    Controlled,
    /// Above the threshold but within income
    Elevated,
    /// More than the income
    OverIncome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeUsage {
    pub month: Month,
    pub income: Money,
    pub spent: Money,
    pub balance: Money,
    /// `spent / income * 100`; absent when income is zero
    pub percent_used: Option<f64>,
    pub level: UsageLevel,
}

/// Caption data for the month selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthOverview {
    pub month: Month,
    pub total: Money,
    pub goal_exceeded: bool,
}

/// Service for read-only aggregations
pub struct SummaryService<'a> {
    storage: &'a Storage,
    warning_threshold: u8,
}

impl<'a> SummaryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
        }
    }

    /// Use a custom income warning threshold (percent)
    pub fn with_warning_threshold(mut self, percent: u8) -> Self {
        self.warning_threshold = percent;
        self
    }

    /// Fixed, variable and grand totals of a month; zero for an empty month
    pub fn sum_by_kind(&self, month: Month) -> DashboardResult<KindTotals> {
        let expenses = self.storage.expenses_for_month(month)?;
        Ok(KindTotals::from_expenses(&expenses))
    }

    /// Total per month, always with all twelve months present
    pub fn monthly_totals(&self) -> DashboardResult<BTreeMap<Month, Money>> {
        let expenses = self.storage.all_expenses()?;
        Ok(totals_by_month(&expenses))
    }

    /// Compare a month's spending to its goal; `None` when no goal is set
    pub fn goal_status(&self, month: Month) -> DashboardResult<Option<GoalStatus>> {
        let ledger = self.storage.snapshot()?;
        let Some(goal) = ledger.goals.get(month) else {
            return Ok(None);
        };
        let spent = KindTotals::from_expenses(ledger.expenses.for_month(month)).total;
        Ok(Some(GoalStatus::new(goal.target, spent)))
    }

    /// One row per month, in calendar order
    pub fn annual_summary(&self, income: Money) -> DashboardResult<Vec<MonthSummary>> {
        let ledger = self.storage.snapshot()?;
        let totals = totals_by_month(ledger.expenses.ordered());
        let goals = ledger.goals.targets();

        Ok(Month::ALL
            .iter()
            .map(|&month| {
                let spent = totals.get(&month).copied().unwrap_or_default();
                let goal = goals.get(&month).copied();
                MonthSummary {
                    month,
                    spent,
                    balance: income - spent,
                    goal,
                    status: GoalOutcome::evaluate(goal, spent),
                }
            })
            .collect())
    }

    pub fn annual_totals(&self, income: Money) -> DashboardResult<AnnualTotals> {
        let total_spent: Money = self.monthly_totals()?.values().sum();
        let total_income = income.times(12);
        Ok(AnnualTotals {
            total_spent,
            total_income,
            total_balance: total_income - total_spent,
        })
    }

    /// Per-category totals of a month, largest first
    pub fn spending_by_category(&self, month: Month) -> DashboardResult<Vec<CategorySpending>> {
        let expenses = self.storage.expenses_for_month(month)?;
        let month_total: Money = expenses.iter().map(|e| e.amount).sum();

        let mut grouped: BTreeMap<Category, (Money, usize)> = BTreeMap::new();
        for expense in &expenses {
            let entry = grouped.entry(expense.category).or_default();
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let mut result: Vec<CategorySpending> = grouped
            .into_iter()
            .map(|(category, (total, count))| CategorySpending {
                category,
                total,
                count,
                percentage: total.percent_of(month_total).unwrap_or(0.0),
            })
            .collect();

        // Stable sort keeps category order among equal totals
        result.sort_by(|a, b| b.total.cmp(&a.total));
        Ok(result)
    }

    /// Spent, balance and share of income used for a month
    pub fn income_usage(&self, month: Month, income: Money) -> DashboardResult<IncomeUsage> {
        let spent = self.sum_by_kind(month)?.total;
        let percent_used = spent.percent_of(income);

        let level = match percent_used {
            Some(p) if p <= f64::from(self.warning_threshold) => UsageLevel::Controlled,
            Some(p) if p <= 100.0 => UsageLevel::Elevated,
            Some(_) => UsageLevel::OverIncome,
            None if spent.is_positive() => UsageLevel::OverIncome,
            None => UsageLevel::Controlled,
        };

        Ok(IncomeUsage {
            month,
            income,
            spent,
            balance: income - spent,
            percent_used,
            level,
        })
    }

    /// Total and goal flag for each of the twelve months
    pub fn month_overview(&self) -> DashboardResult<Vec<MonthOverview>> {
        let ledger = self.storage.snapshot()?;
        let totals = totals_by_month(ledger.expenses.ordered());

        Ok(Month::ALL
            .iter()
            .map(|&month| {
                let total = totals.get(&month).copied().unwrap_or_default();
                let goal_exceeded = ledger
                    .goals
                    .get(month)
                    .is_some_and(|goal| goal.is_exceeded_by(total));
                MonthOverview {
                    month,
                    total,
                    goal_exceeded,
                }
            })
            .collect())
    }
}

fn totals_by_month<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> BTreeMap<Month, Money> {
    let mut totals: BTreeMap<Month, Money> =
        Month::ALL.iter().map(|&m| (m, Money::zero())).collect();
    for expense in expenses {
        *totals.entry(expense.month).or_default() += expense.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardPaths;
    use crate::models::NewExpense;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, month: Month, kind: ExpenseKind, category: Category, cents: i64) {
        storage
            .add_expense(NewExpense::new(
                month,
                kind,
                category,
                "item",
                Money::from_cents(cents),
            ))
            .unwrap();
    }

    fn january_scenario(storage: &Storage) {
        storage
            .add_expense(NewExpense::new(
                Month::parse("Janeiro").unwrap(),
                ExpenseKind::Fixed,
                Category::parse("Moradia").unwrap(),
                "Aluguel",
                Money::from_cents(150000),
            ))
            .unwrap();
        storage
            .add_expense(NewExpense::new(
                Month::January,
                ExpenseKind::Variable,
                Category::parse("Lazer").unwrap(),
                "Cinema",
                Money::from_cents(5000),
            ))
            .unwrap();
    }

    #[test]
    fn test_sum_by_kind_scenario() {
        let (_temp, storage) = create_test_storage();
        january_scenario(&storage);

        let totals = SummaryService::new(&storage).sum_by_kind(Month::January).unwrap();
        assert_eq!(totals.fixed, Money::from_cents(150000));
        assert_eq!(totals.variable, Money::from_cents(5000));
        assert_eq!(totals.total, Money::from_cents(155000));
    }

    #[test]
    fn test_sum_by_kind_matches_month_sum_for_every_month() {
        let (_temp, storage) = create_test_storage();
        add(&storage, Month::March, ExpenseKind::Fixed, Category::Food, 1234);
        add(&storage, Month::March, ExpenseKind::Variable, Category::Food, 766);
        add(&storage, Month::December, ExpenseKind::Variable, Category::Health, 99);

        let service = SummaryService::new(&storage);
        for month in Month::ALL {
            let expected: Money = storage
                .expenses_for_month(month)
                .unwrap()
                .iter()
                .map(|e| e.amount)
                .sum();
            assert_eq!(service.sum_by_kind(month).unwrap().total, expected);
        }
        assert_eq!(service.sum_by_kind(Month::May).unwrap(), KindTotals::default());
    }

    #[test]
    fn test_monthly_totals_always_has_twelve_months() {
        let (_temp, storage) = create_test_storage();
        let service = SummaryService::new(&storage);

        let empty = service.monthly_totals().unwrap();
        assert_eq!(empty.len(), 12);
        assert!(empty.values().all(|m| m.is_zero()));

        add(&storage, Month::June, ExpenseKind::Fixed, Category::Other, 500);
        let totals = service.monthly_totals().unwrap();
        assert_eq!(totals.len(), 12);
        assert_eq!(totals[&Month::June], Money::from_cents(500));
    }

    #[test]
    fn test_goal_status_scenario() {
        let (_temp, storage) = create_test_storage();
        january_scenario(&storage);
        storage
            .save_goal(Month::January, Money::from_cents(100000))
            .unwrap();

        let status = SummaryService::new(&storage)
            .goal_status(Month::January)
            .unwrap()
            .unwrap();
        assert_eq!(status.target, Money::from_cents(100000));
        assert_eq!(status.spent, Money::from_cents(155000));
        assert_eq!(status.remaining, Money::from_cents(-55000));
        assert!(status.exceeded);
        assert_eq!(status.band(), GoalBand::Over);
    }

    #[test]
    fn test_goal_status_without_goal_is_none() {
        let (_temp, storage) = create_test_storage();
        january_scenario(&storage);
        assert!(SummaryService::new(&storage)
            .goal_status(Month::January)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_goal_bands() {
        let target = Money::from_cents(10000);
        assert_eq!(GoalStatus::new(target, Money::from_cents(8000)).band(), GoalBand::OnTrack);
        assert_eq!(GoalStatus::new(target, Money::from_cents(9000)).band(), GoalBand::Near);
        assert_eq!(GoalStatus::new(target, Money::from_cents(10000)).band(), GoalBand::Near);
        assert!(!GoalStatus::new(target, Money::from_cents(10000)).exceeded);
        assert_eq!(GoalStatus::new(target, Money::from_cents(10001)).band(), GoalBand::Over);
    }

    #[test]
    fn test_annual_summary_statuses() {
        let (_temp, storage) = create_test_storage();
        add(&storage, Month::January, ExpenseKind::Fixed, Category::Housing, 120000);
        add(&storage, Month::February, ExpenseKind::Fixed, Category::Housing, 80000);
        storage.save_goal(Month::January, Money::from_cents(100000)).unwrap();
        storage.save_goal(Month::February, Money::from_cents(80000)).unwrap();

        let income = Money::from_cents(300000);
        let rows = SummaryService::new(&storage).annual_summary(income).unwrap();

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].month, Month::January);
        assert_eq!(rows[0].status, GoalOutcome::Exceeded);
        assert_eq!(rows[0].balance, Money::from_cents(180000));
        assert_eq!(rows[1].status, GoalOutcome::Met);
        assert_eq!(rows[2].status, GoalOutcome::NoGoal);
        assert_eq!(rows[2].goal, None);
        assert_eq!(rows[2].balance, income);
    }

    #[test]
    fn test_annual_totals() {
        let (_temp, storage) = create_test_storage();
        add(&storage, Month::January, ExpenseKind::Fixed, Category::Housing, 100000);
        add(&storage, Month::August, ExpenseKind::Variable, Category::Leisure, 25050);

        let totals = SummaryService::new(&storage)
            .annual_totals(Money::from_cents(300000))
            .unwrap();
        assert_eq!(totals.total_spent, Money::from_cents(125050));
        assert_eq!(totals.total_income, Money::from_cents(3600000));
        assert_eq!(totals.total_balance, Money::from_cents(3474950));
    }

    #[test]
    fn test_totals_at_the_amount_ceiling() {
        let (_temp, storage) = create_test_storage();
        for month in Month::ALL {
            for kind in [ExpenseKind::Fixed, ExpenseKind::Variable] {
                add(&storage, month, kind, Category::Other, Money::MAX.cents());
            }
        }
        let service = SummaryService::new(&storage);

        let january = service.sum_by_kind(Month::January).unwrap();
        assert_eq!(january.total, Money::MAX.times(2));

        let totals = service.annual_totals(Money::MAX).unwrap();
        assert_eq!(totals.total_spent, Money::MAX.times(24));
        assert_eq!(totals.total_income, Money::MAX.times(12));
        assert_eq!(totals.total_balance, -Money::MAX.times(12));

        let over = NewExpense::new(
            Month::January,
            ExpenseKind::Fixed,
            Category::Other,
            "item",
            Money::from_cents(Money::MAX.cents() + 1),
        );
        assert!(storage.add_expense(over).unwrap_err().is_validation());
    }

    #[test]
    fn test_spending_by_category_sorted_desc() {
        let (_temp, storage) = create_test_storage();
        add(&storage, Month::April, ExpenseKind::Variable, Category::Food, 2500);
        add(&storage, Month::April, ExpenseKind::Variable, Category::Food, 2500);
        add(&storage, Month::April, ExpenseKind::Fixed, Category::Housing, 15000);
        add(&storage, Month::May, ExpenseKind::Fixed, Category::Health, 99999);

        let rows = SummaryService::new(&storage)
            .spending_by_category(Month::April)
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, Category::Housing);
        assert_eq!(rows[0].percentage, 75.0);
        assert_eq!(rows[1].category, Category::Food);
        assert_eq!(rows[1].count, 2);
        assert_eq!(rows[1].total, Money::from_cents(5000));
    }

    #[test]
    fn test_income_usage_levels() {
        let (_temp, storage) = create_test_storage();
        add(&storage, Month::May, ExpenseKind::Fixed, Category::Housing, 90000);
        let service = SummaryService::new(&storage);

        let usage = service.income_usage(Month::May, Money::from_cents(200000)).unwrap();
        assert_eq!(usage.percent_used, Some(45.0));
        assert_eq!(usage.level, UsageLevel::Controlled);
        assert_eq!(usage.balance, Money::from_cents(110000));

        let usage = service.income_usage(Month::May, Money::from_cents(100000)).unwrap();
        assert_eq!(usage.level, UsageLevel::Elevated);

        let usage = service.income_usage(Month::May, Money::from_cents(50000)).unwrap();
        assert_eq!(usage.level, UsageLevel::OverIncome);

        let strict = SummaryService::new(&storage).with_warning_threshold(40);
        let usage = strict.income_usage(Month::May, Money::from_cents(200000)).unwrap();
        assert_eq!(usage.level, UsageLevel::Elevated);
    }

    #[test]
    fn test_income_usage_with_zero_income_omits_percentage() {
        let (_temp, storage) = create_test_storage();
        let service = SummaryService::new(&storage);

        let idle = service.income_usage(Month::May, Money::zero()).unwrap();
        assert_eq!(idle.percent_used, None);
        assert_eq!(idle.level, UsageLevel::Controlled);

        add(&storage, Month::May, ExpenseKind::Fixed, Category::Other, 100);
        let spending = service.income_usage(Month::May, Money::zero()).unwrap();
        assert_eq!(spending.percent_used, None);
        assert_eq!(spending.level, UsageLevel::OverIncome);
    }

    #[test]
    fn test_month_overview_flags_exceeded_goals() {
        let (_temp, storage) = create_test_storage();
        add(&storage, Month::January, ExpenseKind::Fixed, Category::Other, 20000);
        add(&storage, Month::February, ExpenseKind::Fixed, Category::Other, 5000);
        storage.save_goal(Month::January, Money::from_cents(10000)).unwrap();
        storage.save_goal(Month::February, Money::from_cents(10000)).unwrap();

        let overview = SummaryService::new(&storage).month_overview().unwrap();
        assert_eq!(overview.len(), 12);
        assert!(overview[0].goal_exceeded);
        assert!(!overview[1].goal_exceeded);
        assert_eq!(overview[1].total, Money::from_cents(5000));
        assert!(!overview[2].goal_exceeded);
    }
}
