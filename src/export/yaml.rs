//! YAML export
//!
//! Same snapshot as the JSON export, in a format meant for reading.

use std::io::Write;

use crate::error::{DashboardError, DashboardResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full ledger to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> DashboardResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# Expense dashboard export\n# Generated: {}\n# App version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| DashboardError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| DashboardError::Export(e.to_string()))
}
