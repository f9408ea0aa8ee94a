//! Monthly expense trend
//!
//! Total expense for each of the last N calendar months, oldest first.
//! Windows follow calendar month boundaries, so a month is never split or
//! skipped the way a fixed 30-day step would.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use crate::error::{HomeboxError, HomeboxResult};
use crate::models::{Money, Month, RecordKind};
use crate::storage::Storage;

/// Longest trend window a report covers
pub const MAX_TREND_MONTHS: usize = 120;

/// Expense total for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: Month,
    pub total: Money,
}

/// Expense totals for consecutive months
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    /// Oldest first; months without records report zero
    pub points: Vec<TrendPoint>,
}

impl TrendReport {
    /// Generate the trend for the `months` months ending with the month of `today`
    pub fn generate(storage: &Storage, months: usize, today: NaiveDate) -> HomeboxResult<Self> {
        if months > MAX_TREND_MONTHS {
            return Err(HomeboxError::Validation(format!(
                "Trend covers at most {} months, got {}",
                MAX_TREND_MONTHS, months
            )));
        }

        let window = Month::last_n(months, today);
        let (Some(first), Some(last)) = (window.first(), window.last()) else {
            return Ok(Self { points: Vec::new() });
        };

        let by_key: HashMap<String, Money> = storage
            .records()
            .totals_by_month(first.start_date(), last.end_date(), RecordKind::Expense)?
            .into_iter()
            .collect();

        let points = window
            .into_iter()
            .map(|month| TrendPoint {
                month,
                total: by_key
                    .get(&month.to_string())
                    .copied()
                    .unwrap_or_default(),
            })
            .collect();

        Ok(Self { points })
    }

    /// Sum over every month in the window
    pub fn total(&self) -> Money {
        self.points.iter().map(|p| p.total).sum()
    }

    /// Format the report for terminal display, with a proportional bar per month
    pub fn format_terminal(&self, currency: &str) -> String {
        const BAR_WIDTH: f64 = 30.0;

        let mut output = String::new();
        output.push_str(&format!("Expense Trend: last {} months\n", self.points.len()));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let max = self
            .points
            .iter()
            .map(|p| p.total)
            .max()
            .unwrap_or_default();

        for point in &self.points {
            let width = if max.is_zero() {
                0
            } else {
                (point.total.as_f64() / max.as_f64() * BAR_WIDTH).round() as usize
            };
            output.push_str(&format!(
                "{:<9} {:>15} {}\n",
                point.month.label(),
                point.total.format_with_symbol(currency),
                "#".repeat(width)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> HomeboxResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Month", "Expense"])?;
        for point in &self.points {
            csv.write_record([point.month.to_string(), format!("{:.2}", point.total.as_f64())])?;
        }
        csv.flush()?;
        Ok(())
    }
}
