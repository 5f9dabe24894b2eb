use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::types::PageIndex;

use super::{Document, DocumentSink, PageSource, PageWriter};

/// One page of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemoryPage {
    Text { text: String },
    /// Text extraction fails with `cause`.
    Unreadable { cause: String },
}

/// A document whose pages are plain strings, persisted as JSON.
///
/// Exports written through its [`DocumentSink`] can be loaded back with
/// [`MemoryDocument::load`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    path: PathBuf,
    pages: Vec<MemoryPage>,
    copy_failures: BTreeSet<PageIndex>,
}

#[derive(Serialize, Deserialize)]
struct MemoryFile {
    pages: Vec<MemoryPage>,
}

impl MemoryDocument {
    pub fn new<I, S>(path: impl Into<PathBuf>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            pages: pages
                .into_iter()
                .map(|text| MemoryPage::Text { text: text.into() })
                .collect(),
            copy_failures: BTreeSet::new(),
        }
    }

    /// Makes text extraction of `page` fail.
    pub fn with_unreadable_page(mut self, page: PageIndex, cause: &str) -> Self {
        if let Some(slot) = self.pages.get_mut(page.offset()) {
            *slot = MemoryPage::Unreadable {
                cause: cause.to_string(),
            };
        }
        self
    }

    /// Makes copying `page` into an output document fail.
    pub fn with_copy_failure(mut self, page: PageIndex) -> Self {
        self.copy_failures.insert(page);
        self
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SiftError::SourceNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let parsed: MemoryFile =
            serde_json::from_reader(BufReader::new(file)).map_err(|error| SiftError::Open {
                path: path.to_path_buf(),
                cause: error.to_string(),
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            pages: parsed.pages,
            copy_failures: BTreeSet::new(),
        })
    }

    pub fn save(&self) -> Result<()> {
        write_pages(&self.path, &self.pages)
    }

    pub fn pages(&self) -> &[MemoryPage] {
        self.pages.as_slice()
    }
}

fn write_pages(path: &Path, pages: &[MemoryPage]) -> Result<()> {
    let sink_error = |cause: String| SiftError::Sink {
        path: path.to_path_buf(),
        cause,
    };
    let file = File::create(path).map_err(|error| sink_error(error.to_string()))?;
    let mut output = BufWriter::new(file);
    let payload = MemoryFile {
        pages: pages.to_vec(),
    };
    serde_json::to_writer_pretty(&mut output, &payload)
        .map_err(|error| sink_error(error.to_string()))?;
    output
        .flush()
        .map_err(|error| sink_error(error.to_string()))
}

impl PageSource for MemoryDocument {
    fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_text(&self, page: PageIndex) -> Result<String> {
        match self.pages.get(page.offset()) {
            Some(MemoryPage::Text { text }) => Ok(text.clone()),
            Some(MemoryPage::Unreadable { cause }) => Err(SiftError::Extraction {
                page,
                cause: cause.clone(),
            }),
            None => Err(SiftError::Extraction {
                page,
                cause: "page does not exist".to_string(),
            }),
        }
    }
}

impl DocumentSink for MemoryDocument {
    fn create_document<'a>(&'a self, path: &Path) -> Result<Box<dyn PageWriter + 'a>> {
        // Fail here, not in finish, when the destination is not writable.
        File::create(path).map_err(|error| SiftError::Sink {
            path: path.to_path_buf(),
            cause: error.to_string(),
        })?;
        Ok(Box::new(MemoryPageWriter {
            source: self,
            path: path.to_path_buf(),
            kept: BTreeSet::new(),
        }))
    }
}

impl Document for MemoryDocument {
    fn path(&self) -> &Path {
        self.path.as_path()
    }
}

struct MemoryPageWriter<'a> {
    source: &'a MemoryDocument,
    path: PathBuf,
    kept: BTreeSet<PageIndex>,
}

impl PageWriter for MemoryPageWriter<'_> {
    fn copy_page(&mut self, page: PageIndex) -> Result<()> {
        if self.source.copy_failures.contains(&page) {
            return Err(SiftError::Copy {
                page,
                cause: "page object is damaged".to_string(),
            });
        }
        if page.offset() >= self.source.pages.len() {
            return Err(SiftError::Copy {
                page,
                cause: format!("source has only {} pages", self.source.pages.len()),
            });
        }
        self.kept.insert(page);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        let pages: Vec<MemoryPage> = self
            .kept
            .iter()
            .map(|page| self.source.pages[page.offset()].clone())
            .collect();
        write_pages(&self.path, &pages)
    }
}
