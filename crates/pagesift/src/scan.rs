//! Page matcher: applies a compiled query to every page of a document.

use crate::document::PageSource;
use crate::error::{Result, SiftError};
use crate::query::SearchQueryMatcher;
use crate::report::Reporter;
use crate::types::{MatchResult, PageIndex};

/// A page whose text could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: PageIndex,
    pub cause: String,
}

/// Result of one full pass over a document.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub total_pages: u32,
    pub matches: MatchResult,
    pub failures: Vec<PageFailure>,
}

/// Decides a single page.
pub fn scan_page<S: PageSource + ?Sized>(
    source: &S,
    matcher: &SearchQueryMatcher,
    page: PageIndex,
) -> Result<bool> {
    let text = source.extract_text(page)?;
    Ok(matcher.matches(&text))
}

/// Scans pages `1..=total_pages` in order.
///
/// A page that fails extraction is reported and recorded in
/// [`ScanOutcome::failures`]; the scan always covers the whole document.
pub fn find_matches<S: PageSource + ?Sized>(
    source: &S,
    matcher: &SearchQueryMatcher,
    reporter: &dyn Reporter,
) -> ScanOutcome {
    let total_pages = source.total_pages();
    reporter.info(&format!("searching {total_pages} pages..."));

    let mut outcome = ScanOutcome {
        total_pages,
        ..ScanOutcome::default()
    };
    for page in PageIndex::range(total_pages) {
        match scan_page(source, matcher, page) {
            Ok(true) => {
                log::debug!("page {page} matches {}", matcher.expression());
                outcome.matches.push(page);
            }
            Ok(false) => {}
            Err(error) => {
                let cause = match error {
                    SiftError::Extraction { cause, .. } => cause,
                    other => other.to_string(),
                };
                log::warn!("skipping page {page}: {cause}");
                reporter.warning(&format!("error while processing page {page}: {cause}"));
                outcome.failures.push(PageFailure { page, cause });
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::report::{MemoryReporter, ReportLevel};

    fn page(n: u32) -> PageIndex {
        PageIndex::new(n).expect("non-zero page")
    }

    fn scan(doc: &MemoryDocument, query: &str) -> ScanOutcome {
        find_matches(doc, &SearchQueryMatcher::compile(query), &MemoryReporter::new())
    }

    #[test]
    fn and_query_matches_only_pages_with_both_terms() {
        let doc = MemoryDocument::new(
            "report.json",
            [
                "budget draft",
                "year 2024 overview",
                "Final BUDGET for 2024",
                "2023 budget",
                "appendix",
            ],
        );
        let outcome = scan(&doc, "budget & 2024");
        assert_eq!(outcome.matches.numbers(), vec![3]);
        assert_eq!(outcome.total_pages, 5);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn or_query_matches_pages_with_either_term() {
        let doc = MemoryDocument::new(
            "trade.json",
            ["Export figures", "Import duties", "domestic sales", "export controls"],
        );
        assert_eq!(scan(&doc, "export | import").matches.numbers(), vec![1, 2, 4]);
    }

    #[test]
    fn empty_query_matches_every_page() {
        let doc = MemoryDocument::new("any.json", ["", "x", "y z"]);
        assert_eq!(scan(&doc, "").matches.numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn results_are_strictly_increasing_and_in_range() {
        let texts: Vec<String> = (1..=40)
            .map(|n| if n % 3 == 0 { format!("hit {n}") } else { format!("miss {n}") })
            .collect();
        let doc = MemoryDocument::new("many.json", texts);
        let numbers = scan(&doc, "hit").matches.numbers();

        assert!(!numbers.is_empty());
        assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(numbers.iter().all(|n| (1..=40).contains(n)));
        assert_eq!(numbers.len(), 13);
    }

    #[test]
    fn failing_page_does_not_affect_other_pages() {
        let texts = ["tax", "tax", "none", "tax", "none"];
        let healthy = MemoryDocument::new("healthy.json", texts);
        let broken = MemoryDocument::new("broken.json", texts)
            .with_unreadable_page(page(2), "unsupported font encoding");

        let reporter = MemoryReporter::new();
        let outcome = find_matches(&broken, &SearchQueryMatcher::compile("tax"), &reporter);

        let expected: Vec<u32> = scan(&healthy, "tax")
            .matches
            .iter()
            .filter(|p| p.get() != 2)
            .map(PageIndex::get)
            .collect();
        assert_eq!(outcome.matches.numbers(), expected);
        assert_eq!(
            outcome.failures,
            vec![PageFailure {
                page: page(2),
                cause: "unsupported font encoding".to_string(),
            }]
        );

        let warnings = reporter.messages(ReportLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("page 2"), "warning: {}", warnings[0]);
    }

    #[test]
    fn scan_announces_page_count() {
        let doc = MemoryDocument::new("doc.json", ["a", "b"]);
        let reporter = MemoryReporter::new();
        find_matches(&doc, &SearchQueryMatcher::compile("a"), &reporter);
        assert_eq!(
            reporter.messages(ReportLevel::Info),
            vec!["searching 2 pages...".to_string()]
        );
    }

    #[test]
    fn scan_page_returns_explicit_error() {
        let doc = MemoryDocument::new("doc.json", ["a"]).with_unreadable_page(page(1), "bad");
        let result = scan_page(&doc, &SearchQueryMatcher::compile("a"), page(1));
        assert!(matches!(result, Err(SiftError::Extraction { .. })));
    }
}
