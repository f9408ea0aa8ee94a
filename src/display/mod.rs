//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data and PDF page listings for
//! terminal display.

pub mod member;
pub mod pages;
pub mod record;

pub use member::{badge_for, format_member_list};
pub use pages::format_page_list;
pub use record::{format_category_list, format_record_details, format_record_table};
