//! Document collaborators: page text extraction and page copying.
//!
//! The core only talks to documents through these traits. [`PdfDocument`]
//! backs them with `lopdf`. With the `testing` feature, `MemoryDocument`
//! keeps pages as plain strings.

#[cfg(any(test, feature = "testing"))]
mod memory;
mod pdf;

use std::path::Path;

use crate::error::Result;
use crate::types::PageIndex;

#[cfg(any(test, feature = "testing"))]
pub use memory::{MemoryDocument, MemoryPage};
pub use pdf::PdfDocument;

#[cfg(test)]
pub(crate) use pdf::write_test_pdf;

/// Source of per-page plain text.
pub trait PageSource {
    fn total_pages(&self) -> u32;

    /// Extracts the text of one page. Fails with `SiftError::Extraction`.
    fn extract_text(&self, page: PageIndex) -> Result<String>;
}

/// Creates new documents from a subset of this document's pages.
pub trait DocumentSink {
    /// Creates the destination. Fails with `SiftError::Sink` when it cannot be written.
    fn create_document<'a>(&'a self, path: &Path) -> Result<Box<dyn PageWriter + 'a>>;
}

/// An output document being filled with pages from its source.
pub trait PageWriter {
    /// Schedules one source page for the output. Fails with `SiftError::Copy`.
    fn copy_page(&mut self, page: PageIndex) -> Result<()>;

    /// Writes the output. Copied pages keep their source order.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// An opened document the whole pipeline can work with.
pub trait Document: PageSource + DocumentSink {
    fn path(&self) -> &Path;

    /// File extension for derived artifacts.
    fn extension(&self) -> &str {
        self.path()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("pdf")
    }
}
