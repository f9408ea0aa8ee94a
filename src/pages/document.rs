//! Loading source documents and flattening page lists into new documents
//!
//! Every loaded source is renumbered into its own object id range, so pages
//! from several sources can be copied into one output document without id
//! clashes. Flattening copies the non-structural objects of each source that
//! contributes a page, then rebuilds a single flat page tree.

use lopdf::{dictionary, Document, Object, ObjectId};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::sequence::{Page, Rotation};
use crate::error::{HomeboxError, HomeboxResult};

/// PDF version written for new documents
pub const OUTPUT_PDF_VERSION: &str = "1.5";

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// A document opened read-only to supply pages
#[derive(Debug)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub document: Document,
}

impl SourceDocument {
    /// Load `path`, renumbering its objects to start at `first_id`
    pub fn load(path: &Path, first_id: u32) -> HomeboxResult<Self> {
        let mut document = load_document(path)?;
        document.renumber_objects_with(first_id);
        document.max_id = highest_object_id(&document);

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    /// First object id free after this document's range
    pub fn next_free_id(&self) -> u32 {
        self.document.max_id + 1
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Pages in document order, tagged with `source` and no rotation
    pub fn pages(&self, source: usize) -> Vec<Page> {
        self.document
            .get_pages()
            .into_iter()
            .map(|(number, object_id)| Page::new(source, number, object_id))
            .collect()
    }
}

/// Read a whole PDF file
pub fn load_document(path: &Path) -> HomeboxResult<Document> {
    if !path.exists() {
        return Err(HomeboxError::Io(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Document::load(path)
        .map_err(|e| HomeboxError::Pdf(format!("Failed to read {}: {}", path.display(), e)))
}

/// Number of pages in the PDF at `path`
pub fn page_count(path: &Path) -> HomeboxResult<usize> {
    Ok(load_document(path)?.get_pages().len())
}

/// Write `document` to `path`
pub fn save_document(document: &mut Document, path: &Path) -> HomeboxResult<()> {
    document
        .save(path)
        .map_err(|e| HomeboxError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(())
}

fn highest_object_id(document: &Document) -> u32 {
    document
        .objects
        .keys()
        .map(|(id, _)| *id)
        .max()
        .unwrap_or(0)
}

fn type_name(object: &Object) -> Option<&[u8]> {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        Object::Stream(stream) => &stream.dict,
        _ => return None,
    };
    dict.get(b"Type").and_then(|t| t.as_name()).ok()
}

fn is_structural(object: &Object) -> bool {
    matches!(
        type_name(object),
        Some(b"Catalog") | Some(b"Pages") | Some(b"Page") | Some(b"Outlines") | Some(b"Outline")
    )
}

/// Look up `key` on a page, walking up the page tree for inherited attributes
fn inherited_attribute(document: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = document.get_dictionary(page_id).ok()?;
    // Bounded to guard against a cyclic Parent chain
    for _ in 0..64 {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        let parent = current.get(b"Parent").and_then(|p| p.as_reference()).ok()?;
        current = document.get_dictionary(parent).ok()?;
    }
    None
}

/// Build a new document containing `pages` in order, with rotations applied
pub fn flatten(sources: &[SourceDocument], pages: &[Page]) -> HomeboxResult<Document> {
    if pages.is_empty() {
        return Err(HomeboxError::EmptyDocument);
    }

    let mut output = Document::with_version(OUTPUT_PDF_VERSION);

    let used: BTreeSet<usize> = pages.iter().map(|p| p.source).collect();
    for &index in &used {
        let source = sources.get(index).ok_or_else(|| {
            HomeboxError::Pdf(format!("Page refers to unknown source document {}", index))
        })?;
        for (id, object) in &source.document.objects {
            if !is_structural(object) {
                output.objects.insert(*id, object.clone());
            }
        }
    }
    output.max_id = highest_object_id(&output);

    let pages_id = output.new_object_id();
    let mut kids = Vec::with_capacity(pages.len());

    for page in pages {
        let source = &sources[page.source].document;
        let mut dict = source
            .get_dictionary(page.object_id)
            .map_err(|e| {
                HomeboxError::Pdf(format!(
                    "Page {} of {} is unreadable: {}",
                    page.number,
                    sources[page.source].path.display(),
                    e
                ))
            })?
            .clone();

        for key in INHERITABLE {
            if !dict.has(key) {
                if let Some(value) = inherited_attribute(source, page.object_id, key) {
                    dict.set(key, value);
                }
            }
        }

        let existing = dict.get(b"Rotate").and_then(|r| r.as_i64()).unwrap_or(0);
        dict.set("Rotate", page.rotation.apply_to(existing));
        dict.set("Parent", pages_id);

        kids.push(Object::Reference(output.add_object(dict)));
    }

    let count = kids.len() as i64;
    output.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = output.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    output.trailer.set("Root", catalog_id);

    output.prune_objects();
    output.renumber_objects();
    output.compress();

    Ok(output)
}

/// Load `paths` as consecutive sources with disjoint object ids
pub fn load_sources(paths: &[PathBuf]) -> HomeboxResult<Vec<SourceDocument>> {
    let mut sources = Vec::with_capacity(paths.len());
    let mut next_id = 1;
    for path in paths {
        let source = SourceDocument::load(path, next_id)?;
        next_id = source.next_free_id();
        sources.push(source);
    }
    Ok(sources)
}

/// Flatten selected pages of a single source with a uniform extra rotation
pub(crate) fn extract_pages(
    source: &SourceDocument,
    numbers: impl IntoIterator<Item = u32>,
    rotation: Rotation,
) -> HomeboxResult<Document> {
    let all = source.document.get_pages();
    let pages: Vec<Page> = numbers
        .into_iter()
        .filter_map(|number| {
            all.get(&number).map(|&object_id| Page {
                source: 0,
                number,
                object_id,
                rotation,
            })
        })
        .collect();

    flatten(std::slice::from_ref(source), &pages)
}
