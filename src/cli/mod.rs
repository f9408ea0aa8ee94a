//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod export;
pub mod member;
pub mod pdf;
pub mod record;
pub mod report;

pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use member::{handle_member_command, MemberCommands};
pub use pdf::{handle_pdf_command, PdfCommands};
pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{HomeboxError, HomeboxResult};
use crate::models::{Money, Month, RECORD_DATE_FORMAT};

/// Parse `YYYY-MM`, defaulting to the current month
pub(crate) fn parse_month(month: Option<&str>) -> HomeboxResult<Month> {
    match month {
        Some(s) => Month::parse(s).map_err(|e| {
            HomeboxError::Validation(format!(
                "Invalid month '{}': {}. Use YYYY-MM (e.g., 2025-01)",
                s, e
            ))
        }),
        None => Ok(Month::current()),
    }
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(value: &str) -> HomeboxResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), RECORD_DATE_FORMAT).map_err(|_| {
        HomeboxError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", value))
    })
}

pub(crate) fn parse_amount(value: &str) -> HomeboxResult<Money> {
    Money::parse(value)
        .map_err(|e| HomeboxError::Validation(format!("Invalid amount '{}': {}", value, e)))
}

/// Open `path` for writing through a buffer
pub(crate) fn create_output(path: &Path) -> HomeboxResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        HomeboxError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
