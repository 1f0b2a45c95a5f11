//! Monthly spending goal
//!
//! A user-set ceiling for one month. At most one goal exists per month;
//! saving again overwrites the target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::month::Month;

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    NonPositiveTarget(Money),
    TargetTooLarge(Money),
}

impl std::fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveTarget(amount) => {
                write!(f, "goal: target must be greater than zero (got {})", amount)
            }
            Self::TargetTooLarge(amount) => {
                write!(f, "goal: target must not exceed {} (got {})", Money::MAX, amount)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyGoal {
    pub month: Month,
    pub target: Money,
    pub updated_at: DateTime<Utc>,
}

impl MonthlyGoal {
    pub fn new(month: Month, target: Money) -> Self {
        Self {
            month,
            target,
            updated_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if !self.target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target));
        }
        if self.target.exceeds_max() {
            return Err(GoalValidationError::TargetTooLarge(self.target));
        }
        Ok(())
    }

    /// Whether `spent` goes past this goal
    pub fn is_exceeded_by(&self, spent: Money) -> bool {
        spent > self.target
    }
}
