//! Ledger record model
//!
//! A record is one dated income or expense entry, optionally linked to a
//! category and to the household member who paid or received it.

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, MemberId, RecordId};
use super::money::Money;

/// Date format accepted for record dates
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a record is money going out or coming in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(format!("Unknown record kind: {}", other)),
        }
    }
}

impl ToSql for RecordKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for RecordKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// A stored ledger record with its category and payer names resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub amount: Money,
    pub category_id: Option<CategoryId>,
    /// Category name, `None` when the reference is empty or dangling
    pub category: Option<String>,
    pub payer_id: Option<MemberId>,
    /// Payer name, `None` when the reference is empty or dangling
    pub payer: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn is_expense(&self) -> bool {
        self.kind == RecordKind::Expense
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} {}",
            self.id,
            self.date.format(RECORD_DATE_FORMAT),
            self.kind,
            self.amount,
            self.category.as_deref().unwrap_or("-")
        )
    }
}

/// Raw field values for creating or replacing a record
#[derive(Debug, Clone)]
pub struct RecordInput {
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    pub kind: RecordKind,
    pub amount: Money,
    pub category: String,
    pub payer: String,
    pub note: Option<String>,
}

/// Record input after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecordInput {
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub amount: Money,
    pub category: String,
    pub payer: String,
    pub note: Option<String>,
}

impl RecordInput {
    /// Check the input and normalize names and note
    ///
    /// Amount and date problems are reported before missing selections.
    pub fn validate(&self) -> Result<ValidRecordInput, RecordValidationError> {
        if !self.amount.is_positive() {
            return Err(RecordValidationError::NonPositiveAmount(self.amount));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), RECORD_DATE_FORMAT)
            .map_err(|_| RecordValidationError::InvalidDate(self.date.clone()))?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(RecordValidationError::MissingCategory);
        }

        let payer = self.payer.trim();
        if payer.is_empty() {
            return Err(RecordValidationError::MissingPayer);
        }

        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(ValidRecordInput {
            date,
            kind: self.kind,
            amount: self.amount,
            category: category.to_string(),
            payer: payer.to_string(),
            note,
        })
    }
}

/// Validation errors for record input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NonPositiveAmount(Money),
    InvalidDate(String),
    MissingCategory,
    MissingPayer,
}

impl RecordValidationError {
    /// Missing selections are reported separately from bad values
    pub fn is_missing_selection(&self) -> bool {
        matches!(self, Self::MissingCategory | Self::MissingPayer)
    }
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::InvalidDate(date) => write!(f, "Invalid date '{}': use YYYY-MM-DD", date),
            Self::MissingCategory => write!(f, "A category must be selected"),
            Self::MissingPayer => write!(f, "A payer must be selected"),
        }
    }
}

impl std::error::Error for RecordValidationError {}
