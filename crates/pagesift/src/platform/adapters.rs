use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, SiftError};

use super::types::PrinterProbe;

pub trait PrintService: Send + Sync {
    fn id(&self) -> &str {
        "unsupported"
    }

    fn probe(&self) -> PrinterProbe {
        PrinterProbe::Unsupported
    }

    /// Submits a file to the default printer. `Ok(true)` means the request was accepted.
    fn print_file(&self, _path: &Path) -> Result<bool> {
        Err(SiftError::Print(
            "printing is not supported on this platform".to_string(),
        ))
    }
}

pub type SharedPrintService = Arc<dyn PrintService>;

/// Print adapter for platforms without native print integration.
#[derive(Debug, Default)]
pub struct UnsupportedPrintService;

impl PrintService for UnsupportedPrintService {}

#[cfg(any(unix, windows))]
mod system;
#[cfg(any(unix, windows))]
pub use system::SystemPrintService;
