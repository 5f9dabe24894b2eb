//! pagesift: find the pages of a PDF that match a keyword query.
//!
//! Usage: `pagesift <document> <query> <action>` where action is one of
//! `list`, `export` or `print`.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use pagesift::platform::default_print_service;
use pagesift::{Action, ConsoleReporter, Reporter, SearchRequest, SiftConfig, SiftError};

const AFTER_HELP: &str = "\
Query operators:
  &   all terms must appear on the page
  |   any term may appear on the page
  `|` binds looser than `&`; matching ignores case.

Put `--` before the query when it looks like a flag:
  pagesift notes.pdf -- -q list

Examples:
  pagesift report.pdf \"budget & 2024\" list
  pagesift manual.pdf \"export | import\" export
  pagesift invoice.pdf \"total\" print";

#[derive(Debug, Parser)]
#[command(name = "pagesift")]
#[command(about = "Find PDF pages matching an AND/OR keyword query", long_about = None)]
#[command(version, arg_required_else_help = true, after_help = AFTER_HELP)]
struct Cli {
    /// PDF document to search
    document: PathBuf,

    /// Keyword query, e.g. "budget & 2024" or "export | import"
    #[arg(allow_hyphen_values = true)]
    query: String,

    /// What to do with the matched pages: list, export or print
    #[arg(allow_hyphen_values = true, value_parser = parse_action)]
    action: Action,

    /// Print even when no default printer is detected
    #[arg(long, env = "PAGESIFT_FORCE_PRINT")]
    force_print_without_default_printer: bool,

    /// Milliseconds to wait before deleting the temporary print file
    #[arg(long, env = "PAGESIFT_PRINT_GRACE_MS", value_name = "MS")]
    print_grace_ms: Option<u64>,

    /// Milliseconds to wait for the print command to exit
    #[arg(long, env = "PAGESIFT_PRINT_WAIT_MS", value_name = "MS")]
    print_wait_ms: Option<u64>,

    /// Directory for exported documents (defaults to the document's directory)
    #[arg(long, env = "PAGESIFT_OUTPUT_DIR", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// JSON settings file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn request(&self) -> SearchRequest {
        SearchRequest {
            document: self.document.clone(),
            query: self.query.clone(),
            action: self.action,
        }
    }

    /// Defaults, then the `--config` file, then flags and environment.
    fn settings(&self) -> Result<SiftConfig, SiftError> {
        let mut config = match &self.config {
            Some(path) => SiftConfig::load(path)?,
            None => SiftConfig::default(),
        };
        if self.force_print_without_default_printer {
            config.force_print_without_default_printer = true;
        }
        if let Some(ms) = self.print_grace_ms {
            config.print_grace_ms = ms;
        }
        if let Some(ms) = self.print_wait_ms {
            config.print_wait_ms = ms;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        Ok(config)
    }
}

fn parse_action(raw: &str) -> Result<Action, String> {
    raw.parse::<Action>().map_err(|error| match error {
        SiftError::Usage(message) => message,
        other => other.to_string(),
    })
}

/// Maps the legacy `-help`, `/?` and `-version` spellings onto clap's flags.
fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(position, arg)| {
            if position != 1 {
                return arg;
            }
            match arg.to_str() {
                Some("-help") | Some("/?") => OsString::from("--help"),
                Some("-version") => OsString::from("--version"),
                _ => arg,
            }
        })
        .collect()
}

/// No arguments at all: show help and succeed.
fn is_bare_invocation(error: &clap::Error) -> bool {
    error.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Help, version and usage errors exit here without searching.
    let cli = match Cli::try_parse_from(normalize_legacy_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(error) if is_bare_invocation(&error) => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        Err(error) => error.exit(),
    };

    let reporter = if cli.quiet {
        ConsoleReporter::quiet()
    } else {
        ConsoleReporter::new()
    };

    let config = match cli.settings() {
        Ok(config) => config,
        Err(error) => {
            reporter.error(&error.to_string());
            return ExitCode::FAILURE;
        }
    };
    log::debug!("settings: {config:?}");

    let print_service = default_print_service(config.print_wait());
    match pagesift::run(&cli.request(), &config, &reporter, print_service.as_ref()) {
        Ok(summary) => {
            log::info!(
                "{} of {} pages matched, {} unreadable",
                summary.scan.matches.len(),
                summary.scan.total_pages,
                summary.scan.failures.len()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            reporter.error(&error.to_string());
            ExitCode::FAILURE
        }
    }
}
