//! Data CLI commands: export, import and reset

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::{DashboardError, DashboardResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::services::ImportService;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Expense rows in the import layout
    Csv,
    /// Full snapshot as JSON
    Json,
    /// Full snapshot as YAML
    Yaml,
}

/// Data subcommands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Export data (stdout unless --output is given)
    Export {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all expenses with the rows of a CSV file
    Import { file: PathBuf },

    /// Delete expenses, goals and income
    Reset {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

fn write_export<W: Write>(
    storage: &Storage,
    format: ExportFormat,
    mut writer: W,
) -> DashboardResult<()> {
    match format {
        ExportFormat::Csv => {
            export_expenses_csv(storage, &mut writer)?;
        }
        ExportFormat::Json => {
            export_full_json(storage, &mut writer, true)?;
            writeln!(writer).map_err(|e| DashboardError::Export(e.to_string()))?;
        }
        ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
    }
    writer.flush().map_err(|e| DashboardError::Export(e.to_string()))
}

pub fn handle_data_command(storage: &Storage, cmd: DataCommands) -> DashboardResult<()> {
    match cmd {
        DataCommands::Export { format, output } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    DashboardError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                write_export(storage, format, BufWriter::new(file))?;
                eprintln!("Exported to {}", path.display());
            }
            None => write_export(storage, format, io::stdout().lock())?,
        },

        DataCommands::Import { file } => {
            let summary = ImportService::new(storage).import_file(&file)?;
            println!("Imported {} expenses.", summary.imported);
            if let Some(income) = summary.income {
                println!("Monthly income set to {}.", income);
            }
        }

        DataCommands::Reset { yes } => {
            if !yes {
                println!(
                    "This deletes all expenses, goals and the income. Re-run with --yes to confirm."
                );
                return Ok(());
            }
            storage.clear_all()?;
            println!("All data removed.");
        }
    }

    Ok(())
}
