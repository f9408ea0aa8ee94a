//! Interactive page editing session
//!
//! A [`PageEditor`] holds the documents opened during a session and the page
//! sequence being edited. Nothing touches disk until [`PageEditor::save`].

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::document::{flatten, save_document, SourceDocument};
use super::sequence::{PageSequence, Rotation};
use crate::error::{HomeboxError, HomeboxResult};

/// A page as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// 1-based position in the sequence
    pub position: usize,
    /// File the page came from
    pub source: PathBuf,
    /// 1-based page number in that file
    pub source_page: u32,
    pub rotation: Rotation,
}

/// Editing session over one document plus any inserted documents
#[derive(Debug, Default)]
pub struct PageEditor {
    path: Option<PathBuf>,
    sources: Vec<SourceDocument>,
    sequence: PageSequence,
    next_id: u32,
}

impl PageEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path`, replacing the current session
    pub fn open(&mut self, path: &Path) -> HomeboxResult<()> {
        let source = SourceDocument::load(path, 1)?;
        let pages = source.pages(0);

        tracing::info!(path = %path.display(), pages = pages.len(), "Opened document for editing");

        self.next_id = source.next_free_id();
        self.sources = vec![source];
        self.sequence = PageSequence::new(pages);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Path of the document opened last, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sequence(&self) -> &PageSequence {
        &self.sequence
    }

    /// Describe every page of the current sequence
    pub fn pages(&self) -> Vec<PageInfo> {
        self.sequence
            .pages()
            .iter()
            .enumerate()
            .map(|(i, page)| PageInfo {
                position: i + 1,
                source: self.sources[page.source].path.clone(),
                source_page: page.number,
                rotation: page.rotation,
            })
            .collect()
    }

    /// Move the page at `index` one place earlier; returns its new index
    pub fn move_up(&mut self, index: usize) -> usize {
        self.sequence.move_up(index)
    }

    /// Move the page at `index` one place later; returns its new index
    pub fn move_down(&mut self, index: usize) -> usize {
        self.sequence.move_down(index)
    }

    /// Remove the page at `index`; returns false for an invalid index
    pub fn delete(&mut self, index: usize) -> bool {
        self.sequence.delete(index).is_some()
    }

    /// Rotate the page at `index` by a multiple of 90 degrees
    pub fn rotate(&mut self, index: usize, degrees: i32) -> HomeboxResult<bool> {
        self.sequence.rotate(index, degrees)
    }

    /// Splice every page of `path` in after `after`, or at the end when `None`
    pub fn insert(&mut self, path: &Path, after: Option<usize>) -> HomeboxResult<usize> {
        let source = SourceDocument::load(path, self.next_id.max(1))?;
        let pages = source.pages(self.sources.len());
        let inserted = pages.len();

        self.next_id = source.next_free_id();
        self.sources.push(source);
        self.sequence.insert_after(after, pages);

        tracing::info!(path = %path.display(), pages = inserted, ?after, "Inserted document");
        Ok(inserted)
    }

    /// Write the current sequence to `output`
    ///
    /// The session is left unchanged, whether or not the write succeeds.
    pub fn save(&self, output: &Path) -> HomeboxResult<()> {
        if self.sequence.is_empty() {
            return Err(HomeboxError::EmptyDocument);
        }

        let mut document = flatten(&self.sources, self.sequence.pages())?;
        save_document(&mut document, output)?;

        tracing::info!(path = %output.display(), pages = self.sequence.len(), "Saved edited document");
        Ok(())
    }
}

/// One editing step, parsed from `move-up:3`, `move-down:3`, `delete:3`,
/// `rotate:3:90` or `insert:other.pdf[:3]`; positions are 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    MoveUp(usize),
    MoveDown(usize),
    Delete(usize),
    Rotate(usize, i32),
    Insert(PathBuf, Option<usize>),
}

impl EditOp {
    /// Apply this step to `editor`
    ///
    /// Position 0 does not name a page, so a step using it does nothing.
    pub fn apply(&self, editor: &mut PageEditor) -> HomeboxResult<()> {
        match self {
            Self::MoveUp(position) => {
                if let Some(index) = position.checked_sub(1) {
                    editor.move_up(index);
                }
            }
            Self::MoveDown(position) => {
                if let Some(index) = position.checked_sub(1) {
                    editor.move_down(index);
                }
            }
            Self::Delete(position) => {
                if let Some(index) = position.checked_sub(1) {
                    editor.delete(index);
                }
            }
            Self::Rotate(position, degrees) => {
                // Checked before the position, as for any rotation
                let delta = Rotation::from_degrees(*degrees)?;
                if let Some(index) = position.checked_sub(1) {
                    editor.rotate(index, delta.degrees() as i32)?;
                }
            }
            Self::Insert(path, after) => match after {
                None => {
                    editor.insert(path, None)?;
                }
                Some(position) => {
                    if let Some(index) = position.checked_sub(1) {
                        editor.insert(path, Some(index))?;
                    }
                }
            },
        }
        Ok(())
    }
}

fn parse_position(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position),
        _ => Err(format!("Invalid page position '{}': use 1 or more", value)),
    }
}

impl std::str::FromStr for EditOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid edit step '{}'", s))?;

        match op {
            "move-up" => Ok(Self::MoveUp(parse_position(rest)?)),
            "move-down" => Ok(Self::MoveDown(parse_position(rest)?)),
            "delete" => Ok(Self::Delete(parse_position(rest)?)),
            "rotate" => {
                let (position, degrees) = rest
                    .split_once(':')
                    .ok_or_else(|| format!("Rotate needs a position and angle: '{}'", s))?;
                let degrees = degrees
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid angle '{}'", degrees))?;
                Ok(Self::Rotate(parse_position(position)?, degrees))
            }
            "insert" => match rest.rsplit_once(':') {
                Some((path, after)) if after.trim().parse::<usize>().is_ok() => Ok(Self::Insert(
                    PathBuf::from(path),
                    Some(parse_position(after)?),
                )),
                _ => Ok(Self::Insert(PathBuf::from(rest), None)),
            },
            other => Err(format!("Unknown edit step '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{page_rotations, page_widths, write_sample_pdf};
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.pdf");
        let b = temp_dir.path().join("b.pdf");
        write_sample_pdf(&a, &[101, 102, 103]);
        write_sample_pdf(&b, &[301, 302]);
        (temp_dir, a, b)
    }

    #[test]
    fn test_open_lists_pages() {
        let (_temp_dir, a, _) = setup();
        let mut editor = PageEditor::new();
        editor.open(&a).unwrap();

        let pages = editor.pages();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2].position, 3);
        assert_eq!(pages[2].source_page, 3);
        assert!(pages.iter().all(|p| p.rotation == Rotation::NONE));
        assert_eq!(editor.path(), Some(a.as_path()));
    }

    #[test]
    fn test_edit_and_save() {
        let (temp_dir, a, b) = setup();
        let mut editor = PageEditor::new();
        editor.open(&a).unwrap();

        assert_eq!(editor.move_down(0), 1);
        editor.rotate(1, 90).unwrap();
        assert_eq!(editor.insert(&b, Some(0)).unwrap(), 2);
        assert!(editor.delete(4));

        let out = temp_dir.path().join("out.pdf");
        editor.save(&out).unwrap();

        assert_eq!(page_widths(&out), vec![102, 301, 302, 101]);
        assert_eq!(page_rotations(&out), vec![0, 0, 0, 90]);
    }

    #[test]
    fn test_insert_at_end_and_same_file_twice() {
        let (temp_dir, a, _) = setup();
        let mut editor = PageEditor::new();
        editor.open(&a).unwrap();
        editor.insert(&a, None).unwrap();

        let out = temp_dir.path().join("twice.pdf");
        editor.save(&out).unwrap();
        assert_eq!(page_widths(&out), vec![101, 102, 103, 101, 102, 103]);
    }

    #[test]
    fn test_save_empty_sequence() {
        let (temp_dir, a, _) = setup();
        let mut editor = PageEditor::new();
        editor.open(&a).unwrap();
        for _ in 0..3 {
            editor.delete(0);
        }

        let out = temp_dir.path().join("empty.pdf");
        assert!(matches!(editor.save(&out), Err(HomeboxError::EmptyDocument)));
        assert!(!out.exists());
        assert!(matches!(
            PageEditor::new().save(&out),
            Err(HomeboxError::EmptyDocument)
        ));
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let (temp_dir, a, _) = setup();
        let mut editor = PageEditor::new();
        editor.open(&a).unwrap();
        editor.rotate(0, 180).unwrap();
        let before = editor.sequence().clone();

        let bad = temp_dir.path().join("missing-dir").join("out.pdf");
        assert!(editor.save(&bad).is_err());
        assert_eq!(editor.sequence(), &before);
    }

    #[test]
    fn test_open_replaces_session() {
        let (_temp_dir, a, b) = setup();
        let mut editor = PageEditor::new();
        editor.open(&a).unwrap();
        editor.open(&b).unwrap();
        assert_eq!(editor.len(), 2);
        assert_eq!(editor.pages()[0].source, b);
    }

    #[test]
    fn test_parse_edit_ops() {
        assert_eq!("move-up:3".parse::<EditOp>().unwrap(), EditOp::MoveUp(3));
        assert_eq!(
            "rotate:2:-90".parse::<EditOp>().unwrap(),
            EditOp::Rotate(2, -90)
        );
        assert_eq!(
            "insert:extra.pdf:4".parse::<EditOp>().unwrap(),
            EditOp::Insert(PathBuf::from("extra.pdf"), Some(4))
        );
        assert_eq!(
            "insert:extra.pdf".parse::<EditOp>().unwrap(),
            EditOp::Insert(PathBuf::from("extra.pdf"), None)
        );
        assert!("delete:0".parse::<EditOp>().is_err());
        assert!("flip:1".parse::<EditOp>().is_err());
        assert!("rotate:1".parse::<EditOp>().is_err());
    }

    #[test]
    fn test_apply_edit_ops() {
        let (_temp_dir, a, _) = setup();
        let mut editor = PageEditor::new();
        editor.open(&a).unwrap();

        for op in ["move-up:3", "rotate:1:270", "delete:9"] {
            op.parse::<EditOp>().unwrap().apply(&mut editor).unwrap();
        }

        let numbers: Vec<_> = editor.pages().iter().map(|p| p.source_page).collect();
        assert_eq!(numbers, vec![1, 3, 2]);
        assert_eq!(editor.pages()[0].rotation.degrees(), 270);

        let err = "rotate:1:45"
            .parse::<EditOp>()
            .unwrap()
            .apply(&mut editor)
            .unwrap_err();
        assert!(matches!(err, HomeboxError::InvalidAngle(45)));
    }

    #[test]
    fn test_apply_position_zero_is_noop() {
        let (_temp_dir, a, b) = setup();
        let mut editor = PageEditor::new();
        editor.open(&a).unwrap();
        let before = editor.sequence().clone();

        for op in [
            EditOp::MoveUp(0),
            EditOp::MoveDown(0),
            EditOp::Delete(0),
            EditOp::Rotate(0, 90),
            EditOp::Insert(b.clone(), Some(0)),
            EditOp::MoveDown(usize::MAX),
        ] {
            op.apply(&mut editor).unwrap();
        }
        assert_eq!(editor.sequence(), &before);

        assert!(matches!(
            EditOp::Rotate(0, 45).apply(&mut editor),
            Err(HomeboxError::InvalidAngle(45))
        ));
    }
}
