use std::path::Path;

use chrono::NaiveDateTime;

use crate::document::Document;
use crate::error::{Result, SiftError};
use crate::report::Reporter;
use crate::types::MatchResult;

use super::naming::unique_export_path;
use super::print::remove_if_exists;
use super::{CopyReport, ExportReport};

/// Copies `matches` from `document` into a new document at `destination`.
///
/// A page that fails to copy is reported and left out. Failing to create or
/// write the destination is fatal.
pub fn copy_matches(
    document: &dyn Document,
    destination: &Path,
    matches: &MatchResult,
    reporter: &dyn Reporter,
) -> Result<CopyReport> {
    reporter.info(&format!("copying pages: {matches}"));
    let mut writer = document.create_document(destination)?;

    let mut report = CopyReport::default();
    for page in matches.iter() {
        match writer.copy_page(page) {
            Ok(()) => report.copied.push(page),
            Err(error) if error.is_recoverable() => {
                let cause = match error {
                    SiftError::Copy { cause, .. } => cause,
                    other => other.to_string(),
                };
                log::warn!("skipping page {page} in {}: {cause}", destination.display());
                reporter.warning(&format!("error while copying page {page}: {cause}"));
                report.skipped.push(page);
            }
            Err(other) => return Err(other),
        }
    }

    writer.finish()?;
    Ok(report)
}

pub(super) fn export_matches(
    document: &dyn Document,
    matches: &MatchResult,
    query: &str,
    output_dir: Option<&Path>,
    timestamp: NaiveDateTime,
    reporter: &dyn Reporter,
) -> Result<ExportReport> {
    let path = unique_export_path(
        document.path(),
        output_dir,
        query,
        timestamp,
        document.extension(),
    );
    let copy = match copy_matches(document, &path, matches, reporter) {
        Ok(copy) => copy,
        Err(error) => {
            // Do not leave a truncated export behind.
            if let Err(cleanup) = remove_if_exists(&path) {
                log::warn!("cannot remove partial export {}: {cleanup}", path.display());
            }
            return Err(error);
        }
    };

    reporter.info(&format!("filtered document saved: {}", path.display()));
    Ok(ExportReport { path, copy })
}
