//! Export module
//!
//! - CSV: the bulk interchange file, readable by the importer
//! - JSON: machine-readable full ledger snapshot
//! - YAML: human-readable full ledger snapshot

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_expenses_csv, CSV_HEADER};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
