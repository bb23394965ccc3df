// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Medparse: PDF text extraction for medical annotation tooling.
//
// Entry point. Initialises logging, parses arguments, runs extraction and
// emits the JSON record to standard output or to the given file. Logs go to
// standard error so standard output carries only JSON.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use medparse_core::{ExtractionConfig, MedparseError, UsageReport};
use medparse_document::extract_text_from_pdf;
use tracing::{debug, error, info, warn};

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "MEDPARSE_CONFIG";

const USAGE: &str = "Usage: medparse <input.pdf> [output.json]";

/// Extract text from a PDF into a JSON record.
///
/// Both arguments are paths, including ones that look like flags, so there
/// is no `--help` or `--version`.
#[derive(Parser, Debug)]
#[command(name = "medparse", about, disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// PDF file to extract.
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,
    /// Write the JSON record here instead of standard output.
    #[arg(allow_hyphen_values = true)]
    output: Option<PathBuf>,
}

impl Args {
    /// Parse process arguments, treating every one of them as positional.
    fn parse_paths(args: impl IntoIterator<Item = OsString>) -> Result<Self, clap::Error> {
        let argv = [OsString::from("medparse"), OsString::from("--")]
            .into_iter()
            .chain(args);
        Self::try_parse_from(argv)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::parse_paths(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            debug!(kind = ?err.kind(), "argument parsing failed");
            return report(&MedparseError::Usage(USAGE.to_string()));
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is_usage_error() {
                error!(error = %err, "medparse failed");
            }
            report(&err)
        }
    }
}

fn run(args: &Args) -> Result<(), MedparseError> {
    if !args.input.exists() {
        return Err(MedparseError::FileNotFound(args.input.display().to_string()));
    }

    let config = load_config();
    let result = extract_text_from_pdf(&args.input, &config);
    if !result.is_success() {
        warn!(error = result.error().unwrap_or_default(), "extraction failed");
    }

    let json = result.to_json_pretty()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), "result written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Config from `MEDPARSE_CONFIG`, or defaults when unset or unreadable.
fn load_config() -> ExtractionConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return ExtractionConfig::default();
    };
    let path = Path::new(&path);
    match ExtractionConfig::load(path) {
        Ok(config) => {
            debug!(path = %path.display(), "config loaded");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring config, using defaults");
            ExtractionConfig::default()
        }
    }
}

/// Print a top-level error record and fail the process.
fn report(err: &MedparseError) -> ExitCode {
    match serde_json::to_string(&UsageReport::new(err.to_string())) {
        Ok(json) => println!("{json}"),
        Err(ser) => error!(error = %ser, "failed to serialise error report"),
    }
    ExitCode::FAILURE
}
