use anyhow::Result;
use clap::{Parser, Subcommand};

use homebox::cli::{
    handle_category_command, handle_export_command, handle_member_command, handle_pdf_command,
    handle_record_command, handle_report_command, CategoryCommands, ExportCommands,
    MemberCommands, PdfCommands, RecordCommands, ReportCommands,
};
use homebox::config::{paths::HomeboxPaths, settings::Settings};
use homebox::logging::init_logging;
use homebox::storage::{initialize_storage, needs_initialization};

#[derive(Parser)]
#[command(
    name = "homebox",
    version,
    about = "Household expense ledger and PDF page toolbox",
    long_about = "homebox keeps a household ledger of expenses and income in a local \
                  SQLite file, with monthly summaries by category and member, and \
                  bundles a PDF toolbox for cutting, splitting, merging, rotating, \
                  compressing and rearranging pages."
)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ledger record commands
    #[command(subcommand, alias = "rec")]
    Record(RecordCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Household member commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Monthly reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export reports and records
    #[command(subcommand)]
    Export(ExportCommands),

    /// PDF page tools
    #[command(subcommand)]
    Pdf(PdfCommands),

    /// Create the ledger with default categories and members
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = HomeboxPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Record(cmd)) => {
            let storage = initialize_storage(&paths, &settings)?;
            handle_record_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let storage = initialize_storage(&paths, &settings)?;
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Member(cmd)) => {
            let storage = initialize_storage(&paths, &settings)?;
            handle_member_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let storage = initialize_storage(&paths, &settings)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            let storage = initialize_storage(&paths, &settings)?;
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Pdf(cmd)) => {
            handle_pdf_command(&settings, cmd)?;
        }
        Some(Commands::Init) => {
            if !needs_initialization(&paths) {
                println!("homebox is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }

            println!("Initializing homebox at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            initialize_storage(&paths, &settings)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories: {}", settings.default_categories.join(", "));
            println!("Default members:    {}", settings.default_members.join(", "));
            println!();
            println!("Run 'homebox record add --help' to record your first expense.");
        }
        Some(Commands::Config) => {
            println!("homebox Configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.ledger_db().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Trend months:     {}", settings.trend_months);
            println!("  Default quality:  {}", settings.default_quality);
        }
        None => {
            println!("homebox - household ledger and PDF page toolbox");
            println!();
            println!("Run 'homebox --help' for usage information.");
        }
    }

    Ok(())
}
