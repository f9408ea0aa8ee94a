//! One-shot document transforms
//!
//! Each function reads its inputs whole, writes a new file and leaves the
//! inputs untouched.

use std::path::{Path, PathBuf};

use super::document::{extract_pages, flatten, load_sources, save_document, SourceDocument};
use super::naming;
use super::sequence::Rotation;
use crate::error::{HomeboxError, HomeboxResult};

/// Result of a range cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutOutcome {
    pub output: PathBuf,
    pub start: u32,
    /// Last page written, after clamping to the page count
    pub end: u32,
}

/// Copy pages `start..=end` (1-based) of `input` into `output`
///
/// `output` defaults to `name(start-end).pdf` next to the input, using the
/// requested `end`. The pages written stop at the last page: `end` is
/// clamped to the page count; a `start` below 1, after `end`, or past the
/// last page is rejected.
pub fn cut_range(
    input: &Path,
    start: u32,
    end: u32,
    output: Option<&Path>,
) -> HomeboxResult<CutOutcome> {
    if start < 1 {
        return Err(HomeboxError::Validation(
            "Start page must be 1 or greater".into(),
        ));
    }
    if start > end {
        return Err(HomeboxError::Validation(format!(
            "Start page {} is after end page {}",
            start, end
        )));
    }

    let source = SourceDocument::load(input, 1)?;
    let page_count = source.page_count() as u32;
    if start > page_count {
        return Err(HomeboxError::Validation(format!(
            "Start page {} is past the last page ({})",
            start, page_count
        )));
    }
    // Named after the requested range, even when it runs past the last page
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| naming::cut_output(input, start, end));
    let end = end.min(page_count);

    let mut document = extract_pages(&source, start..=end, Rotation::NONE)?;
    save_document(&mut document, &output)?;

    tracing::info!(input = %input.display(), start, end, output = %output.display(), "Cut page range");

    Ok(CutOutcome { output, start, end })
}

/// Write every page of `input` to its own file
///
/// Files are named `name(i).pdf` inside `out_dir`, which defaults to a
/// directory called `name` next to the input. Returns the written paths in
/// page order.
pub fn split_all(input: &Path, out_dir: Option<&Path>) -> HomeboxResult<Vec<PathBuf>> {
    let source = SourceDocument::load(input, 1)?;
    let page_count = source.page_count() as u32;
    if page_count == 0 {
        return Err(HomeboxError::EmptyDocument);
    }

    let dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| naming::split_dir(input));
    std::fs::create_dir_all(&dir)
        .map_err(|e| HomeboxError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;

    let mut written = Vec::with_capacity(page_count as usize);
    for number in 1..=page_count {
        let path = dir.join(naming::split_page_name(input, number));
        let mut document = extract_pages(&source, [number], Rotation::NONE)?;
        save_document(&mut document, &path)?;
        written.push(path);
    }

    tracing::info!(input = %input.display(), pages = written.len(), dir = %dir.display(), "Split document");

    Ok(written)
}

/// Concatenate the pages of `inputs`, in list order, into `output`
///
/// Needs at least two inputs.
pub fn merge_ordered(inputs: &[PathBuf], output: &Path) -> HomeboxResult<usize> {
    if inputs.len() < 2 {
        return Err(HomeboxError::InsufficientInput {
            needed: 2,
            given: inputs.len(),
        });
    }

    let sources = load_sources(inputs)?;
    let pages: Vec<_> = sources
        .iter()
        .enumerate()
        .flat_map(|(index, source)| source.pages(index))
        .collect();
    let page_count = pages.len();

    let mut document = flatten(&sources, &pages)?;
    save_document(&mut document, output)?;

    tracing::info!(inputs = inputs.len(), pages = page_count, output = %output.display(), "Merged documents");

    Ok(page_count)
}

/// Rotate every page of `input` by `degrees` and write the result to `output`
pub fn rotate_document(input: &Path, output: &Path, degrees: i32) -> HomeboxResult<usize> {
    let rotation = Rotation::from_degrees(degrees)?;
    let source = SourceDocument::load(input, 1)?;
    let page_count = source.page_count() as u32;

    let mut document = extract_pages(&source, 1..=page_count, rotation)?;
    save_document(&mut document, output)?;

    tracing::info!(input = %input.display(), degrees, output = %output.display(), "Rotated document");

    Ok(page_count as usize)
}
