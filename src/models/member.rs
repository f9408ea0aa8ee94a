//! Household members who pay for or receive ledger records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{validate_name, NameValidationError};
use super::ids::MemberId;

/// A household member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Check a proposed member name, returning it trimmed
    pub fn validate_name(name: &str) -> Result<String, NameValidationError> {
        validate_name(name)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
