//! Member Summary Report
//!
//! Expense totals per paying member for one calendar month.

use serde::Serialize;
use std::io::Write;

use super::{summarize, SummaryRow, UNASSIGNED};
use crate::display::member::badge_for;
use crate::error::HomeboxResult;
use crate::models::{Money, Month, RecordKind};
use crate::storage::Storage;

/// Expense totals per payer, largest first
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummaryReport {
    pub month: Month,
    pub rows: Vec<SummaryRow>,
    pub total: Money,
}

impl MemberSummaryReport {
    /// Generate the report for `month`
    pub fn generate(storage: &Storage, month: Month) -> HomeboxResult<Self> {
        let totals = storage.records().totals_by_payer(
            month.start_date(),
            month.end_date(),
            RecordKind::Expense,
        )?;
        let (rows, total) = summarize(totals);

        tracing::debug!(%month, groups = rows.len(), "Generated member summary");

        Ok(Self { month, rows, total })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Expenses by Member: {}\n", self.month.label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for row in &self.rows {
            let name = row.display_name(UNASSIGNED);
            output.push_str(&format!(
                "{} {:<27} {:>15} {:>7.1}%\n",
                badge_for(name),
                name,
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
        csv.write_record(["Month", "Member", "Amount", "Percentage"])?;

        for row in &self.rows {
            csv.write_record([
                self.month.to_string(),
                row.display_name(UNASSIGNED).to_string(),
                format!("{:.2}", row.total.as_f64()),
                format!("{:.2}", row.percentage),
            ])?;
        }
        csv.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordInput;
    use crate::services::LedgerService;

    fn add(service: &LedgerService, day: &str, cents: i64, payer: &str, kind: RecordKind) {
        service
            .add_record(RecordInput {
                date: day.into(),
                kind,
                amount: Money::from_cents(cents),
                category: "Other".into(),
                payer: payer.into(),
                note: None,
            })
            .unwrap();
    }

    #[test]
    fn test_member_expense_summary() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        add(&service, "2025-04-01", 1000, "Zhang", RecordKind::Expense);
        add(&service, "2025-04-02", 3000, "Liu", RecordKind::Expense);
        add(&service, "2025-04-03", 500, "Zhang", RecordKind::Expense);
        add(&service, "2025-04-04", 99999, "Zhang", RecordKind::Income);

        let report = MemberSummaryReport::generate(&storage, Month::new(2025, 4).unwrap())
            .unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].name.as_deref(), Some("Liu"));
        assert_eq!(report.rows[0].total.cents(), 3000);
        assert_eq!(report.rows[1].total.cents(), 1500);
        assert_eq!(report.total.cents(), 4500);
    }

    #[test]
    fn test_export_csv_rows() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        add(&service, "2025-04-01", 1000, "Zhang", RecordKind::Expense);

        let report = MemberSummaryReport::generate(&storage, Month::new(2025, 4).unwrap())
            .unwrap();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv.lines().nth(1), Some("2025-04,Zhang,10.00,100.00"));
    }
}
