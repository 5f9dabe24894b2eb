use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::PrintService;
use crate::error::{Result, SiftError};
use crate::platform::types::PrinterProbe;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Prints through the operating system: CUPS `lp` on unix, the shell
/// `Print` verb on Windows.
#[derive(Debug)]
pub struct SystemPrintService {
    wait: Duration,
}

impl SystemPrintService {
    pub fn new(wait: Duration) -> Self {
        Self { wait }
    }
}

impl PrintService for SystemPrintService {
    fn id(&self) -> &str {
        if cfg!(windows) {
            "windows"
        } else {
            "cups"
        }
    }

    fn probe(&self) -> PrinterProbe {
        match probe_default_printer() {
            Ok(Some(name)) => PrinterProbe::Available(name),
            Ok(None) => PrinterProbe::Missing,
            Err(error) => {
                log::debug!("default printer probe failed: {error}");
                PrinterProbe::Unsupported
            }
        }
    }

    fn print_file(&self, path: &Path) -> Result<bool> {
        let mut child = print_command(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|error| SiftError::Print(format!("cannot start print command: {error}")))?;

        match wait_with_timeout(&mut child, self.wait)? {
            Some(status) if status.success() => Ok(true),
            Some(status) => {
                log::warn!("print command exited with {status}");
                Ok(false)
            }
            None => {
                log::info!(
                    "print command still running after {} ms, continuing in the background",
                    self.wait.as_millis()
                );
                Ok(true)
            }
        }
    }
}

/// Waits for `child` up to `timeout`; `None` means it is still running.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let started = Instant::now();
    loop {
        let status = child
            .try_wait()
            .map_err(|error| SiftError::Print(format!("cannot wait for print command: {error}")))?;
        if status.is_some() {
            return Ok(status);
        }
        if started.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(unix)]
fn print_command(path: &Path) -> Command {
    let mut command = Command::new("lp");
    command.arg("--").arg(path);
    command
}

#[cfg(windows)]
fn print_command(path: &Path) -> Command {
    let mut command = Command::new("powershell");
    command.args(["-NoProfile", "-NonInteractive", "-Command"]).arg(format!(
        "Start-Process -FilePath '{}' -Verb Print",
        powershell_quote(&path.to_string_lossy())
    ));
    command
}

#[cfg(windows)]
fn powershell_quote(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(unix)]
fn probe_default_printer() -> std::io::Result<Option<String>> {
    let output = Command::new("lpstat").arg("-d").stdin(Stdio::null()).output()?;
    Ok(parse_lpstat_default(&String::from_utf8_lossy(&output.stdout)))
}

#[cfg(windows)]
fn probe_default_printer() -> std::io::Result<Option<String>> {
    let output = Command::new("powershell")
        .args([
            "-NoProfile",
            "-NonInteractive",
            "-Command",
            "(Get-CimInstance -ClassName Win32_Printer -Filter 'Default=true').Name",
        ])
        .stdin(Stdio::null())
        .output()?;
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!name.is_empty()).then_some(name))
}

/// Parses `lpstat -d` output such as `system default destination: Office`.
#[cfg_attr(not(unix), allow(dead_code))]
fn parse_lpstat_default(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (label, name) = line.split_once(':')?;
        let name = name.trim();
        (label.contains("default destination") && !name.is_empty()).then(|| name.to_string())
    })
}
