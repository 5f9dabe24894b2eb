//! Page search for PDF documents.
//!
//! This crate provides the core of the `pagesift` tool:
//! - A flat AND/OR query language over page text
//! - A page matcher producing ascending page lists
//! - Actions on the matched pages: list, export to a new document, or print

pub mod action;
pub mod config;
pub mod document;
pub mod error;
pub mod platform;
pub mod query;
pub mod report;
pub mod run;
pub mod scan;
pub mod types;

// Re-export main types
pub use action::{Action, ActionDispatcher, ActionOutcome};
pub use config::SiftConfig;
pub use document::{Document, DocumentSink, PageSource, PageWriter, PdfDocument};
#[cfg(any(test, feature = "testing"))]
pub use document::MemoryDocument;
pub use error::{Result, SiftError};
pub use query::{QueryExpression, QueryParser, SearchQueryMatcher};
pub use report::{ConsoleReporter, ReportLevel, Reporter};
pub use run::{run, run_on_document, RunSummary, SearchRequest};
pub use scan::{find_matches, ScanOutcome};
pub use types::{MatchResult, PageIndex};
