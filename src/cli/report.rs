//! CLI commands for reports
//!
//! Monthly summaries by category and member, the month overview and the
//! spending trend. Each can print to the terminal or export CSV.

use clap::Subcommand;
use std::path::PathBuf;

use super::{create_output, parse_month};
use crate::config::settings::Settings;
use crate::error::{HomeboxError, HomeboxResult};
use crate::reports::{
    CategorySummaryReport, MemberSummaryReport, MonthSummaryReport, TrendReport, MAX_TREND_MONTHS,
};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Expense totals per category for a month
    #[command(alias = "categories")]
    Category {
        /// Month to report on (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expense totals per member for a month
    #[command(alias = "members")]
    Member {
        #[arg(short, long)]
        month: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income, expense and balance for a month, split by member
    #[command(alias = "summary")]
    Month {
        #[arg(short, long)]
        month: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Monthly expense totals for recent months
    Trend {
        /// Number of months (1-120), ending with the current one
        #[arg(
            short = 'n',
            long,
            value_parser = clap::value_parser!(u16).range(1..=MAX_TREND_MONTHS as i64)
        )]
        months: Option<u16>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> HomeboxResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Category { month, output } => {
            let report = CategorySummaryReport::generate(storage, parse_month(month.as_deref())?)?;
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Category report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Member { month, output } => {
            let report = MemberSummaryReport::generate(storage, parse_month(month.as_deref())?)?;
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Member report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Month { month, output } => {
            let report = MonthSummaryReport::generate(storage, parse_month(month.as_deref())?)?;
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Month report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Trend { months, output } => {
            let months = months
                .map(usize::from)
                .unwrap_or(settings.trend_months as usize);
            if months == 0 {
                return Err(HomeboxError::Validation(
                    "Trend needs at least one month".into(),
                ));
            }

            let today = chrono::Local::now().date_naive();
            let report = TrendReport::generate(storage, months, today)?;
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Trend report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(currency)),
            }
        }
    }

    Ok(())
}
