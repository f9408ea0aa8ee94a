//! User settings for homebox
//!
//! Manages user preferences: currency display, default trend window, the
//! default compression preset and the names seeded into a fresh ledger.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::paths::HomeboxPaths;
use crate::error::HomeboxError;
use crate::pages::QualityLevel;

/// User settings for homebox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format) for terminal output
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of months shown by the trend report
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,

    /// Compression preset used when none is given
    #[serde(default)]
    pub default_quality: QualityLevel,

    /// Categories created with a fresh ledger
    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,

    /// Members created with a fresh ledger
    #[serde(default = "default_members")]
    pub default_members: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "¥".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// True when `format` can render a plain date
///
/// Time and offset specifiers parse but fail on a date alone, so a sample
/// date is rendered as well.
pub fn is_valid_date_format(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let sample = NaiveDate::default();
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).is_ok()
}

fn default_trend_months() -> u32 {
    12
}

fn default_categories() -> Vec<String> {
    [
        "Groceries",
        "Dining Out",
        "Clothing",
        "Parking",
        "Property Fees",
        "Car Loan",
        "Utilities",
        "Education",
        "Entertainment",
        "Medical",
        "Other",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_members() -> Vec<String> {
    vec!["Zhang".to_string(), "Liu".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            trend_months: default_trend_months(),
            default_quality: QualityLevel::default(),
            default_categories: default_categories(),
            default_members: default_members(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &HomeboxPaths) -> Result<Self, HomeboxError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| HomeboxError::Io(format!("Failed to read settings file: {}", e)))?;

            let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                HomeboxError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if !is_valid_date_format(&settings.date_format) {
                tracing::warn!(
                    date_format = %settings.date_format,
                    "Invalid date format in settings, using the default"
                );
                settings.date_format = default_date_format();
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HomeboxPaths) -> Result<(), HomeboxError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| HomeboxError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| HomeboxError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
