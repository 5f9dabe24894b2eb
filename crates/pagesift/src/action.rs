//! What to do with the matched pages: list, export, or print them.

mod export;
mod naming;
mod print;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::config::SiftConfig;
use crate::document::Document;
use crate::error::{Result, SiftError};
use crate::platform::PrintService;
use crate::report::Reporter;
use crate::types::{MatchResult, PageIndex};

pub use export::copy_matches;
pub use naming::{
    export_file_name, sanitize_query_for_file_name, temporary_artifact_path, unique_export_path,
};
pub use print::TempArtifact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Export,
    Print,
}

impl Action {
    pub const KEYWORDS: &'static str = "list, export, print";

    pub fn as_str(self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Export => "export",
            Action::Print => "print",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = SiftError;

    /// Accepts the keywords case-insensitively, plus the legacy `-page`, `-save`
    /// and `-print` spellings.
    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "list" | "pages" | "page" | "-page" => Ok(Action::List),
            "export" | "save" | "-save" => Ok(Action::Export),
            "print" | "-print" => Ok(Action::Print),
            _ => Err(SiftError::Usage(format!(
                "unknown action '{raw}' (supported: {})",
                Action::KEYWORDS
            ))),
        }
    }
}

/// Pages that made it into an output document and pages that failed to copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: Vec<PageIndex>,
    pub skipped: Vec<PageIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub copy: CopyReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Listed(MatchResult),
    Exported(ExportReport),
    Printed { accepted: bool, copy: CopyReport },
    /// No default printer and printing without one was not allowed.
    PrintCancelled,
}

pub struct ActionDispatcher<'a> {
    config: &'a SiftConfig,
    reporter: &'a dyn Reporter,
    print_service: &'a dyn PrintService,
    clock: fn() -> NaiveDateTime,
}

impl<'a> ActionDispatcher<'a> {
    pub fn new(
        config: &'a SiftConfig,
        reporter: &'a dyn Reporter,
        print_service: &'a dyn PrintService,
    ) -> Self {
        Self {
            config,
            reporter,
            print_service,
            clock: local_now,
        }
    }

    /// Replaces the clock used to timestamp export names.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn dispatch(
        &self,
        action: Action,
        document: &dyn Document,
        matches: &MatchResult,
        original_query: &str,
    ) -> Result<ActionOutcome> {
        log::info!(
            "dispatching {action} for {} matched pages of {}",
            matches.len(),
            document.path().display()
        );
        match action {
            Action::List => {
                self.reporter.info(&format!("matched pages: {matches}"));
                Ok(ActionOutcome::Listed(matches.clone()))
            }
            Action::Export => {
                let report = export::export_matches(
                    document,
                    matches,
                    original_query,
                    self.config.output_dir.as_deref(),
                    (self.clock)(),
                    self.reporter,
                )?;
                Ok(ActionOutcome::Exported(report))
            }
            Action::Print => print::print_matches(
                document,
                matches,
                self.config,
                self.print_service,
                self.reporter,
            ),
        }
    }
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
