use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lopdf::ObjectId;

use crate::error::{Result, SiftError};
use crate::types::PageIndex;

use super::{Document, DocumentSink, PageSource, PageWriter};

/// A PDF opened with `lopdf`.
pub struct PdfDocument {
    path: PathBuf,
    inner: lopdf::Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfDocument {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SiftError::SourceNotFound(path.to_path_buf()));
        }

        let mut inner = lopdf::Document::load(path).map_err(|error| SiftError::Open {
            path: path.to_path_buf(),
            cause: error.to_string(),
        })?;
        // Owner-password-only files open with an empty user password.
        if inner.is_encrypted() {
            inner.decrypt("").map_err(|error| SiftError::Open {
                path: path.to_path_buf(),
                cause: format!("encrypted document: {error}"),
            })?;
        }

        let pages = inner.get_pages();
        log::debug!("opened {} ({} pages)", path.display(), pages.len());
        Ok(Self {
            path: path.to_path_buf(),
            inner,
            pages,
        })
    }
}

impl PageSource for PdfDocument {
    fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_text(&self, page: PageIndex) -> Result<String> {
        if !self.pages.contains_key(&page.get()) {
            return Err(SiftError::Extraction {
                page,
                cause: "page does not exist".to_string(),
            });
        }
        self.inner
            .extract_text(&[page.get()])
            .map_err(|error| SiftError::Extraction {
                page,
                cause: error.to_string(),
            })
    }
}

impl DocumentSink for PdfDocument {
    fn create_document<'a>(&'a self, path: &Path) -> Result<Box<dyn PageWriter + 'a>> {
        let file = File::create(path).map_err(|error| SiftError::Sink {
            path: path.to_path_buf(),
            cause: error.to_string(),
        })?;
        Ok(Box::new(PdfPageWriter {
            source: self,
            path: path.to_path_buf(),
            output: BufWriter::new(file),
            kept: BTreeSet::new(),
        }))
    }
}

impl Document for PdfDocument {
    fn path(&self) -> &Path {
        self.path.as_path()
    }
}

/// Builds the output by removing every page that was not copied from a
/// clone of the source, which keeps shared resources intact.
struct PdfPageWriter<'a> {
    source: &'a PdfDocument,
    path: PathBuf,
    output: BufWriter<File>,
    kept: BTreeSet<u32>,
}

impl PageWriter for PdfPageWriter<'_> {
    fn copy_page(&mut self, page: PageIndex) -> Result<()> {
        if !self.source.pages.contains_key(&page.get()) {
            return Err(SiftError::Copy {
                page,
                cause: format!("source has only {} pages", self.source.pages.len()),
            });
        }
        self.kept.insert(page.get());
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        let dropped: Vec<u32> = self
            .source
            .pages
            .keys()
            .copied()
            .filter(|number| !self.kept.contains(number))
            .collect();

        let mut output = self.source.inner.clone();
        output.delete_pages(&dropped);
        output.prune_objects();
        output.compress();

        let path = self.path.clone();
        let sink_error = |error: String| SiftError::Sink {
            path: path.clone(),
            cause: error,
        };
        output
            .save_to(&mut self.output)
            .map_err(|error| sink_error(error.to_string()))?;
        self.output
            .flush()
            .map_err(|error| sink_error(error.to_string()))?;
        log::debug!(
            "wrote {} pages to {}",
            self.kept.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Writes a minimal PDF with one line of Courier text per page.
#[cfg(test)]
pub(crate) fn write_test_pdf(path: &Path, pages: &[&str]) {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save pdf");
}
