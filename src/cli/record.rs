//! Record CLI commands
//!
//! Add, edit, delete and browse ledger records.

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_month};
use crate::config::settings::Settings;
use crate::display::record::{format_record_details, format_record_table};
use crate::error::{HomeboxError, HomeboxResult};
use crate::models::{RecordId, RecordInput, RecordKind, RECORD_DATE_FORMAT};
use crate::services::LedgerService;
use crate::storage::Storage;

/// Record subcommands
#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Add a new record
    Add {
        /// Amount (e.g., "42" or "42.50"); must be positive
        amount: String,
        /// Category name (created if new)
        #[arg(short, long)]
        category: String,
        /// Member who paid or received the money (created if new)
        #[arg(short, long, alias = "member")]
        payer: String,
        /// Record date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Expense or income
        #[arg(short, long, value_enum, default_value_t = RecordKind::Expense)]
        kind: RecordKind,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Edit an existing record; unspecified fields keep their values
    Edit {
        /// Record ID
        id: RecordId,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long, alias = "member")]
        payer: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long, value_enum)]
        kind: Option<RecordKind>,
        #[arg(short, long)]
        note: Option<String>,
        /// Remove the note
        #[arg(long, conflicts_with = "note")]
        clear_note: bool,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: RecordId,
    },

    /// Show record details
    Show {
        /// Record ID
        id: RecordId,
    },

    /// List records by date range, by month, or the most recent ones
    #[command(alias = "ls")]
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Month to list (YYYY-MM)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        month: Option<String>,
        /// Number of recent records to show when no range is given
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a record command
pub fn handle_record_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecordCommands,
) -> HomeboxResult<()> {
    let service = LedgerService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        RecordCommands::Add {
            amount,
            category,
            payer,
            date,
            kind,
            note,
        } => {
            let date = match date {
                Some(date) => date,
                None => chrono::Local::now()
                    .date_naive()
                    .format(RECORD_DATE_FORMAT)
                    .to_string(),
            };

            let record = service.add_record(RecordInput {
                date,
                kind,
                amount: parse_amount(&amount)?,
                category,
                payer,
                note,
            })?;

            println!(
                "Added {} #{}: {} ({}, {})",
                record.kind,
                record.id,
                record.amount.format_with_symbol(currency),
                record.category.as_deref().unwrap_or_default(),
                record.payer.as_deref().unwrap_or_default(),
            );
        }

        RecordCommands::Edit {
            id,
            amount,
            category,
            payer,
            date,
            kind,
            note,
            clear_note,
        } => {
            let existing = service.get_record(id)?;

            let amount = match amount {
                Some(amount) => parse_amount(&amount)?,
                None => existing.amount,
            };
            let note = if clear_note {
                None
            } else {
                note.or(existing.note)
            };

            let input = RecordInput {
                date: date.unwrap_or_else(|| existing.date.format(RECORD_DATE_FORMAT).to_string()),
                kind: kind.unwrap_or(existing.kind),
                amount,
                category: category.or(existing.category).unwrap_or_default(),
                payer: payer.or(existing.payer).unwrap_or_default(),
                note,
            };

            let record = service.update_record(id, input)?;
            println!("Updated record #{}", record.id);
            print!("{}", format_record_details(&record, currency));
        }

        RecordCommands::Delete { id } => {
            if service.delete_record(id)? {
                println!("Deleted record #{}", id);
            } else {
                println!("No record #{}; nothing deleted", id);
            }
        }

        RecordCommands::Show { id } => {
            let record = service.get_record(id)?;
            print!("{}", format_record_details(&record, currency));
        }

        RecordCommands::List {
            from,
            to,
            month,
            limit,
        } => {
            let records = match (from, to, month) {
                (Some(from), Some(to), _) => {
                    service.query_by_date_range(parse_date(&from)?, parse_date(&to)?)?
                }
                (_, _, Some(month)) => {
                    let month = parse_month(Some(&month))?;
                    service.query_by_date_range(month.start_date(), month.end_date())?
                }
                (None, None, None) => service.list_recent(limit)?,
                _ => {
                    return Err(HomeboxError::Validation(
                        "Use --from and --to together".into(),
                    ))
                }
            };

            print!(
                "{}",
                format_record_table(&records, currency, &settings.date_format)
            );
        }
    }

    Ok(())
}
