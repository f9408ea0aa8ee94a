//! CSV Export functionality
//!
//! The month report is written as one sheet: a summary block of key/value
//! rows, then one section each for categories, members and the trend,
//! separated by blank lines.

use chrono::NaiveDate;
use std::io::Write;

use super::json::MonthExport;
use crate::error::HomeboxResult;
use crate::reports::{UNASSIGNED, UNCATEGORIZED};
use crate::storage::Storage;

fn amount(money: crate::models::Money) -> String {
    format!("{:.2}", money.as_f64())
}

/// Export the month report bundle to CSV
pub fn export_month_csv<W: Write>(export: &MonthExport, writer: W) -> HomeboxResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    csv.write_record(["Month", export.month.to_string().as_str()])?;
    csv.write_record(["Income", amount(export.totals.income).as_str()])?;
    csv.write_record(["Expense", amount(export.totals.expense).as_str()])?;
    csv.write_record(["Balance", amount(export.totals.balance).as_str()])?;
    csv.write_record([""])?;

    csv.write_record(["Category", "Amount", "Percentage"])?;
    for row in &export.categories.rows {
        csv.write_record([
            row.display_name(UNCATEGORIZED).to_string(),
            amount(row.total),
            format!("{:.2}", row.percentage),
        ])?;
    }
    csv.write_record([""])?;

    csv.write_record(["Member", "Amount", "Percentage"])?;
    for row in &export.members.rows {
        csv.write_record([
            row.display_name(UNASSIGNED).to_string(),
            amount(row.total),
            format!("{:.2}", row.percentage),
        ])?;
    }
    csv.write_record([""])?;

    csv.write_record(["Trend Month", "Expense"])?;
    for point in &export.trend.points {
        csv.write_record([point.month.to_string(), amount(point.total)])?;
    }

    csv.flush()?;
    Ok(())
}

/// Export the records dated within `start..=end` to CSV
pub fn export_records_csv<W: Write>(
    storage: &Storage,
    start: NaiveDate,
    end: NaiveDate,
    writer: W,
) -> HomeboxResult<usize> {
    let records = storage
        .records()
        .in_range(start, end, crate::services::MAX_QUERY_ROWS)?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Kind", "Amount", "Category", "Payer", "Note"])?;
    for record in &records {
        csv.write_record([
            record.id.to_string(),
            record.date.to_string(),
            record.kind.to_string(),
            amount(record.amount),
            record.category.clone().unwrap_or_default(),
            record.payer.clone().unwrap_or_default(),
            record.note.clone().unwrap_or_default(),
        ])?;
    }
    csv.flush()?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month, RecordInput, RecordKind};
    use crate::services::LedgerService;

    fn seeded() -> Storage {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        for (day, cents, kind, category, note) in [
            ("2025-06-01", 900000, RecordKind::Income, "Other", None),
            ("2025-06-02", 12050, RecordKind::Expense, "Groceries", Some("milk, eggs")),
            ("2025-06-03", 3000, RecordKind::Expense, "Parking", None),
        ] {
            service
                .add_record(RecordInput {
                    date: day.into(),
                    kind,
                    amount: Money::from_cents(cents),
                    category: category.into(),
                    payer: "Zhang".into(),
                    note: note.map(String::from),
                })
                .unwrap();
        }
        storage
    }

    #[test]
    fn test_export_month_csv() {
        let storage = seeded();
        let export = MonthExport::from_storage(
            &storage,
            Month::new(2025, 6).unwrap(),
            2,
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        )
        .unwrap();

        let mut buffer = Vec::new();
        export_month_csv(&export, &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "Month,2025-06");
        assert_eq!(lines[1], "Income,9000.00");
        assert_eq!(lines[2], "Expense,150.50");
        assert_eq!(lines[3], "Balance,8849.50");
        assert!(lines.contains(&"Groceries,120.50,80.07"));
        assert!(lines.contains(&"Zhang,150.50,100.00"));
        assert!(lines.contains(&"2025-05,0.00"));
        assert_eq!(lines.last(), Some(&"2025-06,150.50"));
    }

    #[test]
    fn test_export_records_csv_quotes_notes() {
        let storage = seeded();
        let mut buffer = Vec::new();
        let count = export_records_csv(
            &storage,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            &mut buffer,
        )
        .unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(count, 3);
        assert!(csv.contains("\"milk, eggs\""));
    }
}
