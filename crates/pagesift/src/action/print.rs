use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::config::SiftConfig;
use crate::document::Document;
use crate::error::{Result, SiftError};
use crate::platform::PrintService;
use crate::report::Reporter;
use crate::types::MatchResult;

use super::export::copy_matches;
use super::naming::temporary_artifact_path;
use super::ActionOutcome;

/// A temporary file that is removed when dropped, or explicitly via
/// [`TempArtifact::cleanup`] after a grace period.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
    removed: bool,
}

impl TempArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Waits `grace`, then deletes the file. Failure is reported, never returned.
    pub fn cleanup(mut self, grace: Duration, reporter: &dyn Reporter) {
        if !grace.is_zero() {
            thread::sleep(grace);
        }
        self.removed = true;
        match remove_if_exists(&self.path) {
            Ok(true) => log::debug!("removed temporary file {}", self.path.display()),
            Ok(false) => {}
            Err(error) => {
                log::warn!("cannot remove {}: {error}", self.path.display());
                reporter.warning(&format!("error while deleting temporary file: {error}"));
            }
        }
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(error) = remove_if_exists(&self.path) {
            log::warn!("cannot remove {}: {error}", self.path.display());
        }
    }
}

/// Removes the file at `path`. `Ok(false)` when there was nothing to remove.
pub(super) fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}

pub(super) fn print_matches(
    document: &dyn Document,
    matches: &MatchResult,
    config: &SiftConfig,
    print_service: &dyn PrintService,
    reporter: &dyn Reporter,
) -> Result<ActionOutcome> {
    reporter.info("printing to the default printer...");

    let probe = print_service.probe();
    if probe.is_available() {
        reporter.info(&probe.describe());
    } else {
        reporter.warning(&probe.describe());
        if !config.force_print_without_default_printer {
            reporter.info("printing cancelled");
            return Ok(ActionOutcome::PrintCancelled);
        }
        reporter.info("continuing without a confirmed default printer...");
    }

    let artifact = TempArtifact::new(temporary_artifact_path(document.extension()));
    reporter.info(&format!("temporary file: {}", artifact.path().display()));

    let copy = copy_matches(document, artifact.path(), matches, reporter)?;
    if !artifact.path().is_file() {
        return Err(SiftError::Sink {
            path: artifact.path().to_path_buf(),
            cause: "temporary document was not created".to_string(),
        });
    }

    let submitted = print_service.print_file(artifact.path());
    artifact.cleanup(config.print_grace(), reporter);

    let accepted = match submitted {
        Ok(true) => {
            reporter.info("print request submitted");
            true
        }
        Ok(false) => {
            reporter.warning("the print request was not accepted");
            false
        }
        Err(error) => {
            log::warn!("print failed via {}: {error}", print_service.id());
            reporter.error(&error.to_string());
            false
        }
    };
    Ok(ActionOutcome::Printed { accepted, copy })
}
