use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};

pub const DEFAULT_PRINT_GRACE_MS: u64 = 1_000;
pub const DEFAULT_PRINT_WAIT_MS: u64 = 5_000;

/// Run settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiftConfig {
    /// Print even when no default printer is configured or it cannot be detected.
    pub force_print_without_default_printer: bool,
    /// Delay before the temporary print artifact is deleted.
    pub print_grace_ms: u64,
    /// How long to wait for the print command to exit.
    pub print_wait_ms: u64,
    /// Directory for exported documents; the source directory when unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            force_print_without_default_printer: false,
            print_grace_ms: DEFAULT_PRINT_GRACE_MS,
            print_wait_ms: DEFAULT_PRINT_WAIT_MS,
            output_dir: None,
        }
    }
}

impl SiftConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|error| {
            SiftError::Config(format!("cannot read {}: {error}", path.display()))
        })?;
        Self::from_json(&raw)
            .map_err(|error| SiftError::Config(format!("{}: {error}", path.display())))
    }

    pub fn from_json(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn print_grace(&self) -> Duration {
        Duration::from_millis(self.print_grace_ms)
    }

    pub fn print_wait(&self) -> Duration {
        Duration::from_millis(self.print_wait_ms)
    }
}
