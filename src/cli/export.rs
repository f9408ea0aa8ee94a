//! CLI commands for data export
//!
//! Writes a month's reports as CSV, JSON or YAML, or the raw records of a
//! date range as CSV.

use clap::{Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use super::{create_output, parse_date, parse_month};
use crate::config::settings::Settings;
use crate::error::HomeboxResult;
use crate::export::{
    export_month_csv, export_month_json, export_month_yaml, export_records_csv, MonthExport,
};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV summary sheet
    Csv,
    /// JSON report bundle
    Json,
    /// YAML report bundle, human-readable
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export every report for a month
    Month {
        /// Output file path
        output: PathBuf,

        /// Month to export (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export the records of a date range to CSV
    Records {
        /// Output file path
        output: PathBuf,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> HomeboxResult<()> {
    match cmd {
        ExportCommands::Month {
            output,
            month,
            format,
            pretty,
        } => {
            let month = parse_month(month.as_deref())?;
            let today = chrono::Local::now().date_naive();
            let export =
                MonthExport::from_storage(storage, month, settings.trend_months as usize, today)?;

            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Csv => export_month_csv(&export, &mut writer)?,
                ExportFormat::Json => export_month_json(&export, &mut writer, pretty)?,
                ExportFormat::Yaml => export_month_yaml(&export, &mut writer)?,
            }
            writer.flush()?;

            println!("Report for {} exported to: {}", month, output.display());
        }

        ExportCommands::Records { output, from, to } => {
            let mut writer = create_output(&output)?;
            let count = export_records_csv(storage, parse_date(&from)?, parse_date(&to)?, &mut writer)?;
            writer.flush()?;

            println!("Exported {} records to: {}", count, output.display());
        }
    }

    Ok(())
}
