//! Deterministic output file names

use std::path::{Path, PathBuf};

use super::compress::QualityLevel;

/// Default file name for merged output
pub const MERGED_FILE_NAME: &str = "merged.pdf";

fn stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

fn sibling(input: &Path, file_name: String) -> PathBuf {
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// `dir/name.pdf` -> `dir/name(start-end).pdf`
pub fn cut_output(input: &Path, start: u32, end: u32) -> PathBuf {
    sibling(input, format!("{}({}-{}).pdf", stem(input), start, end))
}

/// `dir/name.pdf` -> `dir/name/`
pub fn split_dir(input: &Path) -> PathBuf {
    sibling(input, stem(input))
}

/// File name for page `number` of a split, e.g. `name(3).pdf`
pub fn split_page_name(input: &Path, number: u32) -> String {
    format!("{}({}).pdf", stem(input), number)
}

/// `dir/name.pdf` -> `dir/name_edited.pdf`
pub fn edited_output(input: &Path) -> PathBuf {
    sibling(input, format!("{}_edited.pdf", stem(input)))
}

/// `dir/name.pdf` -> `dir/name_rotated.pdf`
pub fn rotated_output(input: &Path) -> PathBuf {
    sibling(input, format!("{}_rotated.pdf", stem(input)))
}

/// `dir/name.pdf` -> `dir/name_<level>.pdf`
pub fn compressed_output(input: &Path, level: QualityLevel) -> PathBuf {
    sibling(input, format!("{}_{}.pdf", stem(input), level))
}

/// `merged.pdf` next to the first input
pub fn merged_output(first_input: &Path) -> PathBuf {
    sibling(first_input, MERGED_FILE_NAME.to_string())
}
