//! JSON Export functionality
//!
//! Serializes the month report bundle with schema versioning.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{HomeboxError, HomeboxResult};
use crate::models::Month;
use crate::reports::{
    CategorySummaryReport, MemberSummaryReport, MonthSummaryReport, MonthTotals, TrendReport,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Every report for one month, as exported
#[derive(Debug, Clone, Serialize)]
pub struct MonthExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub month: Month,
    pub totals: MonthTotals,
    pub categories: CategorySummaryReport,
    pub members: MemberSummaryReport,
    pub summary: MonthSummaryReport,
    pub trend: TrendReport,
}

impl MonthExport {
    /// Gather all reports for `month`, with a trend of `trend_months` ending at `today`
    pub fn from_storage(
        storage: &Storage,
        month: Month,
        trend_months: usize,
        today: NaiveDate,
    ) -> HomeboxResult<Self> {
        let summary = MonthSummaryReport::generate(storage, month)?;

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            month,
            totals: summary.totals,
            categories: CategorySummaryReport::generate(storage, month)?,
            members: MemberSummaryReport::generate(storage, month)?,
            summary,
            trend: TrendReport::generate(storage, trend_months, today)?,
        })
    }
}

/// Write `export` as JSON
pub fn export_month_json<W: Write>(
    export: &MonthExport,
    writer: &mut W,
    pretty: bool,
) -> HomeboxResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| HomeboxError::Export(e.to_string()))?;
    writeln!(writer)?;
    Ok(())
}
