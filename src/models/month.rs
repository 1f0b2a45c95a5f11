//! Calendar month labels
//!
//! Expenses and goals are bucketed by one of twelve fixed month labels, not
//! by date. The enum order is calendar order, so `BTreeMap<Month, _>` and
//! sorting both iterate January first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::text::fold_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "Janeiro")]
    January,
    #[serde(rename = "Fevereiro")]
    February,
    #[serde(rename = "Março")]
    March,
    #[serde(rename = "Abril")]
    April,
    #[serde(rename = "Maio")]
    May,
    #[serde(rename = "Junho")]
    June,
    #[serde(rename = "Julho")]
    July,
    #[serde(rename = "Agosto")]
    August,
    #[serde(rename = "Setembro")]
    September,
    #[serde(rename = "Outubro")]
    October,
    #[serde(rename = "Novembro")]
    November,
    #[serde(rename = "Dezembro")]
    December,
}

impl Month {
    /// All twelve months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The display label, as stored and exported
    pub fn label(&self) -> &'static str {
        match self {
            Month::January => "Janeiro",
            Month::February => "Fevereiro",
            Month::March => "Março",
            Month::April => "Abril",
            Month::May => "Maio",
            Month::June => "Junho",
            Month::July => "Julho",
            Month::August => "Agosto",
            Month::September => "Setembro",
            Month::October => "Outubro",
            Month::November => "Novembro",
            Month::December => "Dezembro",
        }
    }

    /// 1-based calendar number
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// Month from its 1-based calendar number
    pub fn from_number(n: u32) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }

    /// Parse a month label, English name or number (1-12)
    ///
    /// Matching ignores case and accents, so "marco" finds `Março`.
    pub fn parse(s: &str) -> Option<Self> {
        let folded = fold_label(s);
        if let Ok(n) = folded.parse::<u32>() {
            return Self::from_number(n);
        }

        Self::ALL.iter().copied().find(|m| {
            fold_label(m.label()) == folded || m.english_name().eq_ignore_ascii_case(&folded)
        })
    }

    fn english_name(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown month '{}'", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_calendar_order() {
        assert_eq!(Month::ALL.len(), 12);
        assert_eq!(Month::ALL[0], Month::January);
        assert_eq!(Month::ALL[11], Month::December);
        assert!(Month::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(Month::parse("Janeiro"), Some(Month::January));
        assert_eq!(Month::parse("março"), Some(Month::March));
        assert_eq!(Month::parse("MARCO"), Some(Month::March));
        assert_eq!(Month::parse("december"), Some(Month::December));
        assert_eq!(Month::parse("7"), Some(Month::July));
        assert_eq!(Month::parse("13"), None);
        assert_eq!(Month::parse("0"), None);
        assert_eq!(Month::parse("Smarch"), None);
    }

    #[test]
    fn test_number_round_trip() {
        for month in Month::ALL {
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Month::March).unwrap();
        assert_eq!(json, "\"Março\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Month::March);
    }
}
