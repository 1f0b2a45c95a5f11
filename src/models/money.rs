//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so long-running sums never drift.
//! Provides safe arithmetic, lenient parsing of user/CSV input and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single expense, goal or income may hold (10 billion)
    ///
    /// Keeps every total the ledger can build (a year of sums, income times
    /// twelve) far away from `i64` overflow.
    pub const MAX: Money = Money(1_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_dashboard::models::Money;
    /// let amount = Money::from_cents(155000); // 1550.00
    /// assert_eq!(amount.to_string(), "1550.00");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether this amount is above [`Money::MAX`]
    pub const fn exceeds_max(&self) -> bool {
        self.0 > Self::MAX.0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a whole factor (e.g. monthly income times twelve)
    pub const fn times(&self, factor: i64) -> Self {
        Self(self.0 * factor)
    }

    /// Approximate value as a float, for charts and percentages only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// This amount as a percentage of `whole`
    ///
    /// Returns `None` when `whole` is zero; the ratio is undefined there.
    pub fn percent_of(&self, whole: Money) -> Option<f64> {
        if whole.is_zero() {
            None
        } else {
            Some(self.0 as f64 * 100.0 / whole.0 as f64)
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts `"1500"`, `"1500.5"`, `"1500.00"`, `"-10.50"`, `"R$ 1.500,00"`,
    /// `"$1,500.00"` and `"1500,5"`. Digits past the second decimal place are
    /// rounded half-up.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.trim_start();
        let rest = rest
            .strip_prefix("R$")
            .or_else(|| rest.strip_prefix('$'))
            .unwrap_or(rest)
            .trim();

        let normalized = normalize_separators(rest);
        let (whole, fraction) = normalized
            .split_once('.')
            .unwrap_or((normalized.as_str(), ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let digits: Vec<i64> = fraction
            .chars()
            .filter_map(|c| c.to_digit(10).map(i64::from))
            .collect();
        let mut cents = digits.first().copied().unwrap_or(0) * 10 + digits.get(1).copied().unwrap_or(0);
        if digits.get(2).copied().unwrap_or(0) >= 5 {
            cents += 1;
        }

        let total = units
            .checked_mul(100)
            .and_then(|u| u.checked_add(cents))
            .ok_or(MoneyParseError::Overflow)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol and thousands separators
    ///
    /// `Money::from_cents(150000).format_with_symbol("R$")` gives `"R$ 1,500.00"`.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let digits = self.units().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        if symbol.is_empty() {
            format!("{}{}.{:02}", sign, grouped, self.cents_part())
        } else {
            format!("{}{} {}.{:02}", sign, symbol, grouped, self.cents_part())
        }
    }
}

/// Reduce `1.500,00` / `1,500.00` / `1500,5` style input to `units.fraction`
fn normalize_separators(s: &str) -> String {
    let has_dot = s.contains('.');
    let has_comma = s.contains(',');

    match (has_dot, has_comma) {
        (true, true) => {
            // Whichever separator comes last is the decimal mark
            let dot = s.rfind('.').unwrap_or(0);
            let comma = s.rfind(',').unwrap_or(0);
            if comma > dot {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        (false, true) if s.matches(',').count() == 1 => s.replace(',', "."),
        (false, true) => s.replace(',', ""),
        (true, false) if s.matches('.').count() > 1 => s.replace('.', ""),
        _ => s.to_string(),
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain decimal form (`"1550.00"`, `"-550.00"`), also used in CSV files
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    Overflow,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "invalid money format: '{}'", s),
            MoneyParseError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for MoneyParseError {}
