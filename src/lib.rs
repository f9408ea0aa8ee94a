//! homebox - household expense ledger and PDF page toolbox
//!
//! Two independent tools share one binary:
//!
//! - a ledger of dated expense and income records, kept in SQLite, with
//!   monthly summaries by category and member and a multi-month trend
//! - a PDF page toolbox: cut, split, merge, rotate, compress and edit
//!   page sequences
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Ledger data models (records, categories, members, money, months)
//! - `storage`: SQLite store and repositories
//! - `services`: Ledger business logic
//! - `reports`: Monthly summaries and trend
//! - `export`: CSV, JSON and YAML export
//! - `pages`: PDF page editing
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use homebox::config::{paths::HomeboxPaths, settings::Settings};
//! use homebox::storage::initialize_storage;
//!
//! let paths = HomeboxPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = initialize_storage(&paths, &settings)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod pages;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{HomeboxError, HomeboxResult};
