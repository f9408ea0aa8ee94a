//! Ordered page sequence
//!
//! A [`PageSequence`] is the in-memory list of pages under edit. Pages are
//! addressed by position; a page's source and accumulated rotation travel
//! with it when it moves.

use lopdf::ObjectId;
use serde::Serialize;
use std::fmt;

use crate::error::{HomeboxError, HomeboxResult};

/// A clockwise page rotation, always one of 0, 90, 180 or 270
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Rotation(u16);

impl Rotation {
    pub const NONE: Rotation = Rotation(0);

    /// Normalize `degrees` (which may be negative) into a rotation
    ///
    /// Fails with [`HomeboxError::InvalidAngle`] unless `degrees` is a multiple of 90.
    pub fn from_degrees(degrees: i32) -> HomeboxResult<Self> {
        if degrees % 90 != 0 {
            return Err(HomeboxError::InvalidAngle(degrees));
        }
        Ok(Self(degrees.rem_euclid(360) as u16))
    }

    pub fn degrees(&self) -> u16 {
        self.0
    }

    /// Add another rotation, wrapping at 360
    pub fn add(self, other: Rotation) -> Rotation {
        Rotation((self.0 + other.0) % 360)
    }

    /// Apply to a `/Rotate` value read from a page, which may be unnormalized
    pub fn apply_to(self, existing: i64) -> i64 {
        (existing + i64::from(self.0)).rem_euclid(360)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// One page of a loaded source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Index of the source document in the editor's source list
    pub source: usize,
    /// 1-based page number within the source document
    pub number: u32,
    /// The page dictionary in the source document
    pub object_id: ObjectId,
    /// Rotation accumulated during editing
    pub rotation: Rotation,
}

impl Page {
    pub fn new(source: usize, number: u32, object_id: ObjectId) -> Self {
        Self {
            source,
            number,
            object_id,
            rotation: Rotation::NONE,
        }
    }
}

/// The ordered pages of a document under edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSequence {
    pages: Vec<Page>,
}

impl PageSequence {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Swap the page at `index` with the one before it; returns its new index
    ///
    /// Does nothing for the first page or an invalid index.
    pub fn move_up(&mut self, index: usize) -> usize {
        if index == 0 || index >= self.pages.len() {
            return index;
        }
        self.pages.swap(index, index - 1);
        index - 1
    }

    /// Swap the page at `index` with the one after it; returns its new index
    ///
    /// Does nothing for the last page or an invalid index.
    pub fn move_down(&mut self, index: usize) -> usize {
        if index >= self.pages.len().saturating_sub(1) {
            return index;
        }
        self.pages.swap(index, index + 1);
        index + 1
    }

    /// Remove the page at `index`, if there is one
    pub fn delete(&mut self, index: usize) -> Option<Page> {
        if index < self.pages.len() {
            Some(self.pages.remove(index))
        } else {
            None
        }
    }

    /// Add `degrees` to the page's rotation
    ///
    /// The angle is checked before the index; an invalid index is a no-op
    /// and returns `Ok(false)`.
    pub fn rotate(&mut self, index: usize, degrees: i32) -> HomeboxResult<bool> {
        let delta = Rotation::from_degrees(degrees)?;
        match self.pages.get_mut(index) {
            Some(page) => {
                page.rotation = page.rotation.add(delta);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Splice `pages` in after `after`, or append them when `after` is `None`
    ///
    /// An `after` past the end also appends.
    pub fn insert_after(&mut self, after: Option<usize>, pages: Vec<Page>) {
        let at = match after {
            Some(index) if index < self.pages.len() => index + 1,
            _ => self.pages.len(),
        };
        self.pages.splice(at..at, pages);
    }
}
