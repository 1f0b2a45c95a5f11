//! Key/value configuration table (monthly income lives here)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Config key holding the declared monthly income
pub const INCOME_KEY: &str = "income";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTable {
    entries: BTreeMap<String, String>,
}

impl ConfigTable {
    /// Upsert; returns the previous value
    pub fn set(&mut self, key: &str, value: &str) -> Option<String> {
        self.entries.insert(key.to_string(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}
