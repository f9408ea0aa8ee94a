//! Export module for homebox
//!
//! Provides month report export in multiple formats:
//! - CSV: spreadsheet-compatible summary sheet, plus raw record export
//! - JSON: machine-readable report bundle
//! - YAML: human-readable report bundle

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_month_csv, export_records_csv};
pub use json::{export_month_json, MonthExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_month_yaml;
