//! Month Summary Report
//!
//! The month's header totals and the per-member breakdown across both
//! record kinds.

use serde::Serialize;
use std::io::Write;

use super::UNASSIGNED;
use crate::error::HomeboxResult;
use crate::models::{Money, Month, RecordKind};
use crate::storage::{KindTotal, Storage};

/// Income, expense and balance for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub income: Money,
    pub expense: Money,
    /// Income minus expense
    pub balance: Money,
}

impl MonthTotals {
    /// Compute the totals for `month`
    pub fn generate(storage: &Storage, month: Month) -> HomeboxResult<Self> {
        let records = storage.records();
        let income = records.total(month.start_date(), month.end_date(), RecordKind::Income)?;
        let expense = records.total(month.start_date(), month.end_date(), RecordKind::Expense)?;

        Ok(Self {
            income,
            expense,
            balance: income - expense,
        })
    }
}

/// One (member, kind) total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberKindRow {
    pub member: Option<String>,
    pub kind: RecordKind,
    pub total: Money,
}

/// Totals per member and kind, plus the month totals
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummaryReport {
    pub month: Month,
    pub totals: MonthTotals,
    /// Ordered by member name (unnamed group last), then kind
    pub rows: Vec<MemberKindRow>,
}

impl MonthSummaryReport {
    /// Generate the report for `month`
    pub fn generate(storage: &Storage, month: Month) -> HomeboxResult<Self> {
        let totals = MonthTotals::generate(storage, month)?;
        let rows = storage
            .records()
            .totals_by_payer_and_kind(month.start_date(), month.end_date())?
            .into_iter()
            .map(|KindTotal { name, kind, total }| MemberKindRow {
                member: name,
                kind,
                total,
            })
            .collect();

        Ok(Self {
            month,
            totals,
            rows,
        })
    }

    /// Total for one member and kind, zero if absent
    pub fn total_for(&self, member: Option<&str>, kind: RecordKind) -> Money {
        self.rows
            .iter()
            .filter(|row| row.member.as_deref() == member && row.kind == kind)
            .map(|row| row.total)
            .sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Month Summary: {}\n", self.month.label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Income:  {:>15}\n",
            self.totals.income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Expense: {:>15}\n",
            self.totals.expense.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Balance: {:>15}\n\n",
            self.totals.balance.format_with_symbol(currency)
        ));

        output.push_str(&format!("{:<25} {:<10} {:>15}\n", "Member", "Kind", "Amount"));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&format!(
                "{:<25} {:<10} {:>15}\n",
                row.member.as_deref().unwrap_or(UNASSIGNED),
                row.kind,
                row.total.format_with_symbol(currency)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> HomeboxResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Month", "Member", "Kind", "Amount"])?;

        for row in &self.rows {
            csv.write_record([
                self.month.to_string(),
                row.member.as_deref().unwrap_or(UNASSIGNED).to_string(),
                row.kind.to_string(),
                format!("{:.2}", row.total.as_f64()),
            ])?;
        }
        csv.flush()?;

        Ok(())
    }
}
