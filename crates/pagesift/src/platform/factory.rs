use std::sync::Arc;
use std::time::Duration;

use super::adapters::SharedPrintService;

/// Picks the print adapter for the current platform.
pub fn default_print_service(print_wait: Duration) -> SharedPrintService {
    #[cfg(any(unix, windows))]
    {
        Arc::new(super::adapters::SystemPrintService::new(print_wait))
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = print_wait;
        Arc::new(super::adapters::UnsupportedPrintService)
    }
}
