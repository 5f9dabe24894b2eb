/// Outcome of asking the platform for a default printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterProbe {
    Available(String),
    Missing,
    /// The platform offers no way to check.
    Unsupported,
}

impl PrinterProbe {
    pub fn is_available(&self) -> bool {
        matches!(self, PrinterProbe::Available(_))
    }

    /// One line for the user.
    pub fn describe(&self) -> String {
        match self {
            PrinterProbe::Available(name) => format!("default printer: {name}"),
            PrinterProbe::Missing => "no default printer is configured".to_string(),
            PrinterProbe::Unsupported => {
                "the default printer cannot be detected on this platform".to_string()
            }
        }
    }
}
