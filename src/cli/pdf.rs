//! PDF CLI commands
//!
//! Cut, split, merge, rotate, compress and edit PDF documents. Every command
//! writes a new file and leaves its inputs untouched.

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::display::pages::format_page_list;
use crate::error::HomeboxResult;
use crate::pages::{
    cut_range, merge_ordered, naming, rotate_document, split_all, CompressJob, EditOp, PageEditor,
    QualityLevel,
};

/// PDF subcommands
#[derive(Subcommand, Debug)]
pub enum PdfCommands {
    /// Show the page count and page list of a document
    Info {
        /// PDF file
        input: PathBuf,
    },

    /// Copy a page range (1-based, inclusive) into a new file
    Cut {
        /// PDF file
        input: PathBuf,
        /// First page
        start: u32,
        /// Last page; clamped to the page count
        end: u32,
        /// Output file, defaults to `name(start-end).pdf`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write every page to its own file
    Split {
        /// PDF file
        input: PathBuf,
        /// Output directory, defaults to a directory named after the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Concatenate documents in the given order
    Merge {
        /// PDF files, at least two
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,
        /// Output file, defaults to `merged.pdf` next to the first input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rotate every page by a multiple of 90 degrees
    Rotate {
        /// PDF file
        input: PathBuf,
        /// Angle in degrees (e.g., 90, -90, 180)
        #[arg(allow_hyphen_values = true)]
        degrees: i32,
        /// Output file, defaults to `name_rotated.pdf`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Shrink a document using a quality preset
    Compress {
        /// PDF file
        input: PathBuf,
        /// Quality preset, defaults to the configured one
        #[arg(short, long, value_enum)]
        quality: Option<QualityLevel>,
        /// Output file, defaults to `name_<quality>.pdf`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply editing steps in order and save the result
    ///
    /// Steps: move-up:N, move-down:N, delete:N, rotate:N:DEG,
    /// insert:FILE[:N]. Positions are 1-based and refer to the page
    /// order after the previous steps.
    Edit {
        /// PDF file
        input: PathBuf,
        /// Editing step; repeat for several
        #[arg(long = "op", value_name = "STEP", allow_hyphen_values = true)]
        ops: Vec<EditOp>,
        /// Output file, defaults to `name_edited.pdf`
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the page list instead of saving
        #[arg(long)]
        dry_run: bool,
    },
}

/// Handle a PDF command
pub fn handle_pdf_command(settings: &Settings, cmd: PdfCommands) -> HomeboxResult<()> {
    match cmd {
        PdfCommands::Info { input } => {
            let mut editor = PageEditor::new();
            editor.open(&input)?;

            println!("{}: {} pages", input.display(), editor.len());
            print!("{}", format_page_list(&editor.pages()));
        }

        PdfCommands::Cut {
            input,
            start,
            end,
            output,
        } => {
            let outcome = cut_range(&input, start, end, output.as_deref())?;
            println!(
                "Wrote pages {}-{} to: {}",
                outcome.start,
                outcome.end,
                outcome.output.display()
            );
        }

        PdfCommands::Split { input, output } => {
            let written = split_all(&input, output.as_deref())?;
            println!("Split {} into {} files:", input.display(), written.len());
            for path in &written {
                println!("  {}", path.display());
            }
        }

        PdfCommands::Merge { inputs, output } => {
            let output = match output {
                Some(output) => output,
                None => naming::merged_output(&inputs[0]),
            };
            let pages = merge_ordered(&inputs, &output)?;
            println!(
                "Merged {} files ({} pages) into: {}",
                inputs.len(),
                pages,
                output.display()
            );
        }

        PdfCommands::Rotate {
            input,
            degrees,
            output,
        } => {
            let output = output.unwrap_or_else(|| naming::rotated_output(&input));
            let pages = rotate_document(&input, &output, degrees)?;
            println!(
                "Rotated {} pages by {}° into: {}",
                pages,
                degrees,
                output.display()
            );
        }

        PdfCommands::Compress {
            input,
            quality,
            output,
        } => {
            let level = quality.unwrap_or(settings.default_quality);
            let output = output.unwrap_or_else(|| naming::compressed_output(&input, level));

            let job = CompressJob::spawn(input, output, level);
            for tick in job.progress() {
                eprintln!("[{:>3}%] {}", tick.percent, tick.phase.name());
            }
            let report = job.wait()?;

            println!(
                "Compressed {} ({}) -> {}",
                report.input.display(),
                report.level,
                report.output.display()
            );
            println!(
                "  {} -> {} bytes ({:.1}% smaller)",
                report.original_size,
                report.compressed_size,
                report.reduction() * 100.0
            );
        }

        PdfCommands::Edit {
            input,
            ops,
            output,
            dry_run,
        } => {
            let mut editor = PageEditor::new();
            editor.open(&input)?;
            for op in &ops {
                op.apply(&mut editor)?;
            }

            if dry_run {
                print!("{}", format_page_list(&editor.pages()));
                return Ok(());
            }

            let output = output.unwrap_or_else(|| naming::edited_output(&input));
            editor.save(&output)?;
            println!(
                "Applied {} steps; saved {} pages to: {}",
                ops.len(),
                editor.len(),
                output.display()
            );
        }
    }

    Ok(())
}
