//! Command-line interface definitions for netsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing. Anything not
//! given on the command line is asked for interactively unless `--no-input`
//! is set.

mod prompt;
mod scan;

pub use prompt::{Prompt, TermPrompt};
pub use scan::{is_root, run_job, scan_and_write, ScanJob};

use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use crate::scanner::NmapEngine;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// netsweep - validate a CIDR range, scan it with nmap, save the results.
///
/// The scan runs nmap with `-sS -sV -O -A -p 1-1000` by default, which
/// needs root privileges. Results are written as plain text, CSV, JSON,
/// nmap-style greppable output or nmap-style XML.
#[derive(Parser, Debug)]
#[command(name = "netsweep")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan a CIDR range with nmap and save the results", long_about = None)]
pub struct Cli {
    /// Target range in CIDR notation (e.g. 192.168.1.0/24)
    ///
    /// Prompted for when omitted.
    #[arg(value_name = "CIDR")]
    pub target: Option<String>,

    /// Output format for the results file
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file path (a timestamped name is suggested when omitted)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for generated output file names
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Ports to scan (e.g., "80", "80,443", "1-1000", "22,80,443,8000-9000")
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Raw nmap arguments, replacing the configured ones (e.g. "-sT -Pn")
    #[arg(long = "nmap-args", value_name = "ARGS", allow_hyphen_values = true)]
    pub nmap_args: Option<String>,

    /// nmap executable to run
    #[arg(long, env = "NETSWEEP_NMAP", value_name = "PATH")]
    pub nmap: Option<PathBuf>,

    /// Path to custom configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Never prompt; use defaults for anything not given
    #[arg(long)]
    pub no_input: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Load settings, honoring `--config`.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(settings)
    }

    /// Run the whole flow: gather inputs, scan, write. Returns the output path.
    pub async fn execute(self) -> CliResult<PathBuf> {
        let mut settings = self.settings()?;
        if let Some(args) = &self.nmap_args {
            settings.nmap_args = args.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir = Some(dir.clone());
        }

        let mut options = settings.scan_options(self.ports.as_deref())?;
        if self.quiet {
            options = options.without_progress();
        }

        let mut prompt = TermPrompt::new();
        let job = ScanJob::gather(&self, &settings, &mut prompt)?;

        if options.requires_privileges() && !is_root() {
            output::print_warning("these nmap options need root privileges; the scan may fail.");
        }

        let program = self.nmap.clone().unwrap_or_else(|| settings.nmap_path.clone());
        let engine = NmapEngine::new(program, options);

        if !self.quiet {
            output::print_scan_header(&job.target, "nmap", &engine.options().args);
        }

        run_job(&engine, &job, !self.quiet).await?;
        Ok(job.destination)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable plain text, one line per host
    #[value(aliases = ["normal", "txt"])]
    #[serde(alias = "normal")]
    Plain,
    /// CSV with one row per open port
    Csv,
    /// JSON array with one object per host
    Json,
    /// nmap-style greppable lines
    #[value(aliases = ["gnmap", "grep"])]
    #[serde(alias = "gnmap", alias = "grep")]
    Grepable,
    /// nmap-style XML report
    Xml,
}

impl OutputFormat {
    /// File extension used for generated file names.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Plain => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Grepable => "gnmap",
            Self::Xml => "xml",
        }
    }

    /// Parse a user-typed format name, case-insensitively, accepting aliases.
    pub fn parse_loose(s: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(s.trim(), true).ok()
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Plain
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Grepable => write!(f, "grepable"),
            Self::Xml => write!(f, "xml"),
        }
    }
}
