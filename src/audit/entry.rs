//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// Bulk replacement of the expense set
    Import,
    /// Bulk removal (expenses only, or a full reset)
    Clear,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
            Operation::Clear => write!(f, "CLEAR"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Expense,
    Config,
    Goal,
    /// The ledger as a whole, for bulk operations
    Ledger,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::Config => write!(f, "Config"),
            EntityType::Goal => write!(f, "Goal"),
            EntityType::Ledger => write!(f, "Ledger"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation was committed (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Expense ID, config key, goal month, or `"*"` for bulk operations
    pub entity_id: String,

    /// Human-readable label (e.g. "Aluguel (Moradia)")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Changed fields for updates, counts for bulk operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    fn base(operation: Operation, entity_type: EntityType, entity_id: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name: None,
            before: None,
            after: None,
            summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            after: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Create, entity_type, entity_id.into())
        }
    }

    /// Updates keep only the changed-fields summary; the ledger holds the
    /// current record and no prior versions are stored.
    pub fn update(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        summary: Option<String>,
    ) -> Self {
        Self {
            entity_name,
            summary,
            ..Self::base(Operation::Update, entity_type, entity_id.into())
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            before: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Delete, entity_type, entity_id.into())
        }
    }

    /// Entry for an operation that touches many records at once
    pub fn bulk(operation: Operation, entity_type: EntityType, summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::base(operation, entity_type, "*".to_string())
        }
    }

    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  {}", summary));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(Operation::Import.to_string(), "IMPORT");
        assert_eq!(EntityType::Goal.to_string(), "Goal");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"description": "Aluguel", "amount": 150000});
        let entry = AuditEntry::create(
            EntityType::Expense,
            "#1",
            Some("Aluguel (Moradia)".to_string()),
            &data,
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_delete_entry() {
        let data = json!({"description": "Cinema"});
        let entry = AuditEntry::delete(EntityType::Expense, "#2", None, &data);

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_bulk_entry() {
        let entry = AuditEntry::bulk(Operation::Import, EntityType::Ledger, "3 expenses replaced 5");
        assert_eq!(entry.entity_id, "*");

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("IMPORT Ledger *"));
        assert!(formatted.contains("3 expenses replaced 5"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::update(
            EntityType::Config,
            "income",
            None,
            Some("income: 3000.00 -> 3500.00".into()),
        );

        let line = serde_json::to_string(&entry).unwrap();
        assert!(line.contains("\"operation\":\"update\""));
        assert!(!line.contains("\"before\""));
        assert!(!line.contains("\"after\""));
        let back: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.entity_type, EntityType::Config);
        assert_eq!(back.entity_id, "income");
    }
}
