//! Record display formatting
//!
//! Tables for record lists and a detail view for a single record.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, Record, RecordKind};
use crate::reports::{UNASSIGNED, UNCATEGORIZED};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Payer")]
    payer: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Format records as a table
pub fn format_record_table(records: &[Record], currency: &str, date_format: &str) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let rows = records.iter().map(|r| RecordRow {
        id: r.id.get(),
        date: r.date.format(date_format).to_string(),
        kind: kind_label(r.kind).to_string(),
        amount: r.amount.format_with_symbol(currency),
        category: r.category.as_deref().unwrap_or(UNCATEGORIZED).to_string(),
        payer: r.payer.as_deref().unwrap_or(UNASSIGNED).to_string(),
        note: truncate(r.note.as_deref().unwrap_or(""), 30),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a single record for display
pub fn format_record_details(record: &Record, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Record:      #{}\n", record.id));
    output.push_str(&format!("Date:        {}\n", record.date.format("%Y-%m-%d")));
    output.push_str(&format!("Kind:        {}\n", kind_label(record.kind)));
    output.push_str(&format!(
        "Amount:      {}\n",
        record.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Category:    {}\n",
        record.category.as_deref().unwrap_or(UNCATEGORIZED)
    ));
    output.push_str(&format!(
        "Payer:       {}\n",
        record.payer.as_deref().unwrap_or(UNASSIGNED)
    ));
    if let Some(note) = &record.note {
        output.push_str(&format!("Note:        {}\n", note));
    }
    output.push_str(&format!(
        "Created:     {}\n",
        record.created_at.format("%Y-%m-%d %H:%M:%S")
    ));

    output
}

/// Format categories as a simple list
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'homebox init' to create default categories.\n"
            .to_string();
    }

    let mut output = String::from("Categories:\n");
    for category in categories {
        output.push_str(&format!("  {:>4}  {}\n", category.id, category.name));
    }
    output
}

fn kind_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Expense => "🛒 expense",
        RecordKind::Income => "💰 income",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, RecordId};
    use chrono::{NaiveDate, Utc};

    fn record() -> Record {
        Record {
            id: RecordId::new(7),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            kind: RecordKind::Expense,
            amount: Money::from_cents(2599),
            category_id: Some(CategoryId::new(1)),
            category: Some("Groceries".into()),
            payer_id: None,
            payer: None,
            note: Some("Weekly shop".into()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_table() {
        let output = format_record_table(&[record()], "¥", "%Y-%m-%d");
        assert!(output.contains("Groceries"));
        assert!(output.contains("¥25.99"));
        assert!(output.contains("Unassigned"));
        assert!(format_record_table(&[], "¥", "%Y-%m-%d").contains("No records"));
    }

    #[test]
    fn test_record_details() {
        let output = format_record_details(&record(), "$");
        assert!(output.contains("Record:      #7"));
        assert!(output.contains("Note:        Weekly shop"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long note", 10), "a rathe...");
    }
}
