//! Category Summary Report
//!
//! Expense totals per category for one calendar month.

use serde::Serialize;
use std::io::Write;

use super::{summarize, SummaryRow, UNCATEGORIZED};
use crate::error::HomeboxResult;
use crate::models::{Money, Month, RecordKind};
use crate::storage::Storage;

/// Expense totals per category, largest first
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummaryReport {
    pub month: Month,
    pub rows: Vec<SummaryRow>,
    /// Sum of all rows, equal to the month's expense total
    pub total: Money,
}

impl CategorySummaryReport {
    /// Generate the report for `month`
    pub fn generate(storage: &Storage, month: Month) -> HomeboxResult<Self> {
        let totals = storage.records().totals_by_category(
            month.start_date(),
            month.end_date(),
            RecordKind::Expense,
        )?;
        let (rows, total) = summarize(totals);

        tracing::debug!(%month, groups = rows.len(), "Generated category summary");

        Ok(Self { month, rows, total })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Expenses by Category: {}\n", self.month.label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>15} {:>8}\n", "Category", "Amount", "%"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<30} {:>15} {:>7.1}%\n",
                row.display_name(UNCATEGORIZED),
                row.total.format_with_symbol(currency),
                row.percentage
            ));
        }

        if self.rows.is_empty() {
            output.push_str("No expenses recorded.\n");
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "TOTAL",
            self.total.format_with_symbol(currency)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> HomeboxResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Month", "Category", "Amount", "Percentage"])?;

        for row in &self.rows {
            csv.write_record([
                self.month.to_string(),
                row.display_name(UNCATEGORIZED).to_string(),
                format!("{:.2}", row.total.as_f64()),
                format!("{:.2}", row.percentage),
            ])?;
        }

        csv.write_record([
            self.month.to_string(),
            "TOTAL".to_string(),
            format!("{:.2}", self.total.as_f64()),
            "100.00".to_string(),
        ])?;
        csv.flush()?;

        Ok(())
    }
}
