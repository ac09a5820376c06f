//! Page handles into loaded documents.
//!
//! A [`SourceSet`] owns every document loaded for one command. Pages are
//! addressed by [`PageRef`], a small copyable handle that the page
//! composer can reorder, drop and duplicate without touching PDF objects.

use std::fmt;
use std::path::Path;

use super::reader::LoadedPdf;

/// Handle to one page of a document in a [`SourceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageRef {
    /// Index of the document in its source set.
    pub source: usize,
    /// 1-based page number inside that document.
    pub page_number: u32,
}

impl PageRef {
    /// Create a page handle.
    pub fn new(source: usize, page_number: u32) -> Self {
        Self {
            source,
            page_number,
        }
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.source, self.page_number)
    }
}

/// Documents loaded for a single operation.
#[derive(Debug, Default)]
pub struct SourceSet {
    documents: Vec<LoadedPdf>,
}

impl SourceSet {
    /// Create an empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and return handles to all of its pages in order.
    pub fn insert(&mut self, loaded: LoadedPdf) -> Vec<PageRef> {
        let source = self.documents.len();
        let pages = loaded
            .document
            .get_pages()
            .keys()
            .map(|&number| PageRef::new(source, number))
            .collect();

        self.documents.push(loaded);
        pages
    }

    /// Get a loaded document by index.
    pub fn get(&self, source: usize) -> Option<&LoadedPdf> {
        self.documents.get(source)
    }

    /// Path of a loaded document, if present.
    pub fn path(&self, source: usize) -> Option<&Path> {
        self.get(source).map(|loaded| loaded.path.as_path())
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no document was loaded.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total size of all loaded files in bytes.
    pub fn total_size(&self) -> u64 {
        self.documents.iter().map(|loaded| loaded.file_size).sum()
    }
}
