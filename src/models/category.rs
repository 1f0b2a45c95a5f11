//! Expense categories
//!
//! A closed set of ten categories. `Other` ("Outros") is the fallback used
//! when an imported row has no category or one that is not recognised.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::text::fold_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[serde(rename = "Moradia")]
    Housing,
    #[serde(rename = "Alimentação")]
    Food,
    #[serde(rename = "Transporte")]
    Transport,
    #[serde(rename = "Saúde")]
    Health,
    #[serde(rename = "Educação")]
    Education,
    #[serde(rename = "Lazer")]
    Leisure,
    #[serde(rename = "Vestuário")]
    Clothing,
    #[serde(rename = "Serviços")]
    Services,
    #[serde(rename = "Investimentos")]
    Investments,
    #[default]
    #[serde(rename = "Outros")]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Housing,
        Category::Food,
        Category::Transport,
        Category::Health,
        Category::Education,
        Category::Leisure,
        Category::Clothing,
        Category::Services,
        Category::Investments,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Housing => "Moradia",
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Health => "Saúde",
            Category::Education => "Educação",
            Category::Leisure => "Lazer",
            Category::Clothing => "Vestuário",
            Category::Services => "Serviços",
            Category::Investments => "Investimentos",
            Category::Other => "Outros",
        }
    }

    /// Parse a category label or its English name, ignoring case and accents
    pub fn parse(s: &str) -> Option<Self> {
        let folded = fold_label(s);
        if folded.is_empty() {
            return None;
        }

        Self::ALL.iter().copied().find(|c| {
            fold_label(c.label()) == folded || c.english_name() == folded
        })
    }

    /// Parse leniently: blank or unknown input becomes `Other`
    pub fn parse_or_other(s: &str) -> Self {
        Self::parse(s).unwrap_or(Category::Other)
    }

    fn english_name(&self) -> &'static str {
        match self {
            Category::Housing => "housing",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Health => "health",
            Category::Education => "education",
            Category::Leisure => "leisure",
            Category::Clothing => "clothing",
            Category::Services => "services",
            Category::Investments => "investments",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_categories() {
        assert_eq!(Category::ALL.len(), 10);
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Category::parse("Moradia"), Some(Category::Housing));
        assert_eq!(Category::parse("alimentacao"), Some(Category::Food));
        assert_eq!(Category::parse("SAÚDE"), Some(Category::Health));
        assert_eq!(Category::parse("leisure"), Some(Category::Leisure));
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("Pets"), None);
    }

    #[test]
    fn test_parse_or_other() {
        assert_eq!(Category::parse_or_other("Pets"), Category::Other);
        assert_eq!(Category::parse_or_other("  "), Category::Other);
        assert_eq!(Category::parse_or_other("Lazer"), Category::Leisure);
    }

    #[test]
    fn test_every_label_parses_back() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.label()), Some(category));
        }
    }
}
