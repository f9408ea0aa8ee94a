//! Core data models for homebox
//!
//! This module contains the ledger domain: records, categories, household
//! members, money amounts and calendar months.

pub mod category;
pub mod ids;
pub mod member;
pub mod money;
pub mod period;
pub mod record;

pub use category::{Category, NameValidationError};
pub use ids::{CategoryId, MemberId, RecordId};
pub use member::Member;
pub use money::{Money, MoneyParseError};
pub use period::{Month, PeriodParseError};
pub use record::{
    Record, RecordInput, RecordKind, RecordValidationError, ValidRecordInput, RECORD_DATE_FORMAT,
};
