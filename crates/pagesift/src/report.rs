//! User-facing progress and result reporting.
//!
//! Components never write to stdout directly; they receive a [`Reporter`].

#[cfg(any(test, feature = "testing"))]
use std::cell::RefCell;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
}

pub trait Reporter {
    fn report(&self, level: ReportLevel, message: &str);

    fn info(&self, message: &str) {
        self.report(ReportLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.report(ReportLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(ReportLevel::Error, message);
    }
}

/// Writes info lines to stdout and warnings/errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppresses info lines; warnings and errors are still written.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        // A closed pipe must not abort the run.
        let _ = match level {
            ReportLevel::Info if self.quiet => Ok(()),
            ReportLevel::Info => writeln!(std::io::stdout().lock(), "{message}"),
            ReportLevel::Warning => writeln!(std::io::stderr().lock(), "warning: {message}"),
            ReportLevel::Error => writeln!(std::io::stderr().lock(), "error: {message}"),
        };
    }
}

/// Records every line in memory.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: RefCell<Vec<(ReportLevel, String)>>,
}

#[cfg(any(test, feature = "testing"))]
impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(ReportLevel, String)> {
        self.lines.borrow().clone()
    }

    pub fn messages(&self, level: ReportLevel) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(line_level, _)| *line_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(_, message)| message.contains(needle))
    }
}

#[cfg(any(test, feature = "testing"))]
impl Reporter for MemoryReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}
