//! End-to-end pipeline: open, scan, act.

use std::path::PathBuf;

use crate::action::{Action, ActionDispatcher, ActionOutcome};
use crate::config::SiftConfig;
use crate::document::{Document, PdfDocument};
use crate::error::{Result, SiftError};
use crate::platform::PrintService;
use crate::query::SearchQueryMatcher;
use crate::report::Reporter;
use crate::scan::{find_matches, ScanOutcome};

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub document: PathBuf,
    pub query: String,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub scan: ScanOutcome,
    /// `None` when no page matched and no action ran.
    pub outcome: Option<ActionOutcome>,
}

/// Opens the PDF named by `request` and runs the query and action on it.
pub fn run(
    request: &SearchRequest,
    config: &SiftConfig,
    reporter: &dyn Reporter,
    print_service: &dyn PrintService,
) -> Result<RunSummary> {
    if !request.document.is_file() {
        return Err(SiftError::SourceNotFound(request.document.clone()));
    }
    let document = PdfDocument::open(&request.document)?;
    run_on_document(
        &document,
        &request.query,
        request.action,
        config,
        reporter,
        print_service,
    )
}

pub fn run_on_document(
    document: &dyn Document,
    query: &str,
    action: Action,
    config: &SiftConfig,
    reporter: &dyn Reporter,
    print_service: &dyn PrintService,
) -> Result<RunSummary> {
    let matcher = SearchQueryMatcher::compile(query);
    log::debug!(
        "query {:?} compiled to `{}`",
        matcher.raw_query(),
        matcher.expression()
    );

    let scan = find_matches(document, &matcher, reporter);
    if scan.matches.is_empty() {
        reporter.info("no matching pages found");
        return Ok(RunSummary {
            scan,
            outcome: None,
        });
    }
    reporter.info(&format!("{} pages matched", scan.matches.len()));

    let outcome = ActionDispatcher::new(config, reporter, print_service).dispatch(
        action,
        document,
        &scan.matches,
        matcher.raw_query(),
    )?;
    Ok(RunSummary {
        scan,
        outcome: Some(outcome),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{write_test_pdf, MemoryDocument, PageSource};
    use crate::platform::UnsupportedPrintService;
    use crate::report::MemoryReporter;
    use crate::types::PageIndex;

    fn page(n: u32) -> PageIndex {
        PageIndex::new(n).expect("non-zero page")
    }

    #[test]
    fn missing_source_aborts_before_scanning() {
        let dir = tempfile::tempdir().expect("tempdir");
        let request = SearchRequest {
            document: dir.path().join("absent.pdf"),
            query: "x".to_string(),
            action: Action::List,
        };
        let reporter = MemoryReporter::new();
        let result = run(
            &request,
            &SiftConfig::default(),
            &reporter,
            &UnsupportedPrintService,
        );
        assert!(matches!(result, Err(SiftError::SourceNotFound(_))));
        assert!(reporter.lines().is_empty());
    }

    #[test]
    fn no_match_skips_the_action() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc = MemoryDocument::new(dir.path().join("doc.json"), ["alpha", "beta"]);
        let reporter = MemoryReporter::new();

        let summary = run_on_document(
            &doc,
            "gamma",
            Action::Export,
            &SiftConfig::default(),
            &reporter,
            &UnsupportedPrintService,
        )
        .expect("run");

        assert!(summary.outcome.is_none());
        assert!(reporter.contains("no matching pages"));
        let entries = std::fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(entries, 0, "nothing should be exported");
    }

    #[test]
    fn matches_are_counted_then_listed() {
        let doc = MemoryDocument::new("doc.json", ["Export", "Import", "none", "export"]);
        let reporter = MemoryReporter::new();

        let summary = run_on_document(
            &doc,
            "export | import",
            Action::List,
            &SiftConfig::default(),
            &reporter,
            &UnsupportedPrintService,
        )
        .expect("run");

        assert_eq!(summary.scan.matches.numbers(), vec![1, 2, 4]);
        assert!(reporter.contains("3 pages matched"));
        assert!(matches!(summary.outcome, Some(ActionOutcome::Listed(_))));
    }

    #[test]
    fn pdf_export_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("ledger.pdf");
        write_test_pdf(
            &source,
            &["cover", "invoice 1", "blank", "blank", "invoice 2", "blank", "invoice 3"],
        );
        let reporter = MemoryReporter::new();
        let request = SearchRequest {
            document: source.clone(),
            query: "INVOICE".to_string(),
            action: Action::Export,
        };

        let summary = run(
            &request,
            &SiftConfig::default(),
            &reporter,
            &UnsupportedPrintService,
        )
        .expect("run");
        assert_eq!(summary.scan.matches.numbers(), vec![2, 5, 7]);
        let Some(ActionOutcome::Exported(report)) = summary.outcome else {
            panic!("expected export outcome");
        };
        assert_eq!(report.path.parent(), Some(dir.path()));
        assert!(report
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("ledger_INVOICE_") && name.ends_with(".pdf")));

        let exported = PdfDocument::open(&report.path).expect("open export");
        assert_eq!(exported.total_pages(), 3);
        let rescan = find_matches(&exported, &SearchQueryMatcher::compile("invoice"), &reporter);
        assert_eq!(rescan.matches.numbers(), vec![1, 2, 3]);
        assert!(exported.extract_text(page(3)).expect("page 3").contains("invoice 3"));
    }
}
