//! Spending categories
//!
//! Categories are flat named buckets. Names are unique within a ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Longest accepted category or member name
pub const MAX_NAME_LEN: usize = 50;

/// A ledger category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Row id assigned by the store
    pub id: CategoryId,

    /// Category name
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Check a proposed category name, returning it trimmed
    pub fn validate_name(name: &str) -> Result<String, NameValidationError> {
        validate_name(name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String, NameValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(NameValidationError::NameTooLong(len));
    }
    Ok(name.to_string())
}

/// Validation errors for category and member names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Name too long ({} characters, max {})",
                len, MAX_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for NameValidationError {}
