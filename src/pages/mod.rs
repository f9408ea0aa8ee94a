//! PDF page toolbox
//!
//! - [`PageEditor`]: an editing session over a page sequence (reorder,
//!   delete, insert, rotate) flattened into a new file on save
//! - [`tools`]: one-shot range cut, split, merge and whole-document rotation
//! - [`compress`]: preset-based compression with progress and cancellation

pub mod compress;
pub mod document;
pub mod editor;
pub mod naming;
pub mod sequence;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use compress::{
    compress, CancellationToken, CompressJob, CompressReport, Phase, Progress, QualityLevel,
};
pub use document::page_count;
pub use editor::{EditOp, PageEditor, PageInfo};
pub use sequence::{Page, PageSequence, Rotation};
pub use tools::{cut_range, merge_ordered, rotate_document, split_all, CutOutcome};
