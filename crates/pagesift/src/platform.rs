mod adapters;
pub mod factory;
pub mod types;

pub use adapters::{PrintService, SharedPrintService, UnsupportedPrintService};
#[cfg(any(unix, windows))]
pub use adapters::SystemPrintService;
pub use factory::default_print_service;
pub use types::PrinterProbe;
