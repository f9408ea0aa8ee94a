//! Reports module for homebox
//!
//! Monthly ledger reports: expense totals per category and per member, the
//! per-member income/expense breakdown, the month header totals and the
//! multi-month expense trend.
//!
//! Every report puts records with a missing or dangling category/payer into
//! one unnamed group, so group totals always add up to the month total.

pub mod category_summary;
pub mod member_summary;
pub mod month_summary;
pub mod trend;

pub use category_summary::CategorySummaryReport;
pub use member_summary::MemberSummaryReport;
pub use month_summary::{MemberKindRow, MonthSummaryReport, MonthTotals};
pub use trend::{TrendPoint, TrendReport, MAX_TREND_MONTHS};

use serde::Serialize;

use crate::models::Money;
use crate::storage::GroupTotal;

/// Display name for the group of records without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Display name for the group of records without a payer
pub const UNASSIGNED: &str = "Unassigned";

/// One group of a summary report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Group name, `None` for the unnamed group
    pub name: Option<String>,
    pub total: Money,
    /// Share of the report total, 0-100
    pub percentage: f64,
}

impl SummaryRow {
    /// Name to show for this row, using `fallback` for the unnamed group
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

/// Attach percentages to grouped totals and return them with the grand total
pub(crate) fn summarize(totals: Vec<GroupTotal>) -> (Vec<SummaryRow>, Money) {
    let total: Money = totals.iter().map(|t| t.total).sum();

    let rows = totals
        .into_iter()
        .map(|t| SummaryRow {
            percentage: percentage_of(t.total, total),
            name: t.name,
            total: t.total,
        })
        .collect();

    (rows, total)
}

pub(crate) fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}
