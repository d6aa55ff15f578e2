//! Scan flow: validate the target, run the engine, write the results.

use super::prompt::{ask_destination, ask_format, ask_target, Prompt};
use super::{Cli, OutputFormat};
use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::scanner::ScanEngine;
use crate::types::{CidrBlock, HostRecord};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything needed to run one scan and save it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanJob {
    /// Validated target range.
    pub target: CidrBlock,
    /// Output file format.
    pub format: OutputFormat,
    /// Output file path.
    pub destination: PathBuf,
}

impl ScanJob {
    /// Build a job from command-line values, prompting for the rest.
    ///
    /// An invalid CIDR on the command line is fatal; at the prompt the user
    /// is asked again. With `--no-input`, the format and file name fall back
    /// to the configured defaults and a missing target is an error.
    pub fn gather<P: Prompt + ?Sized>(
        cli: &Cli,
        settings: &AppSettings,
        prompt: &mut P,
    ) -> CliResult<Self> {
        let interactive = !cli.no_input;

        let target = match &cli.target {
            Some(raw) => CidrBlock::validate(raw)?,
            None if interactive => ask_target(prompt)?,
            None => {
                return Err(CliError::Other(
                    "no target given; pass a CIDR range such as 192.168.1.0/24".to_string(),
                ))
            }
        };

        let format = match cli.format {
            Some(format) => format,
            None if interactive => ask_format(prompt, settings.default_format)?,
            None => settings.default_format,
        };

        let destination = match &cli.output {
            Some(path) => path.clone(),
            None => {
                let name = output::default_file_name(&target, format, &Local::now());
                let suggested = match &settings.output_dir {
                    Some(dir) => dir.join(name),
                    None => PathBuf::from(name),
                };
                if interactive {
                    ask_destination(prompt, &suggested)?
                } else {
                    suggested
                }
            }
        };

        Ok(Self {
            target,
            format,
            destination,
        })
    }
}

/// Scan the job's target and write the results to its destination.
///
/// With `echo` set, discovered hosts and a completion message are printed.
pub async fn run_job<E: ScanEngine + ?Sized>(
    engine: &E,
    job: &ScanJob,
    echo: bool,
) -> CliResult<Vec<HostRecord>> {
    debug!(target_range = %job.target, engine = engine.name(), "starting scan");
    let results = engine.scan(&job.target).await?;

    if echo {
        output::print_hosts(&results);
    }

    if job.destination.exists() {
        output::print_warning(&format!(
            "Output file {} already exists, overwriting.",
            job.destination.display()
        ));
    }

    output::write_results(&results, job.format, &job.destination)?;

    if echo {
        output::print_success(&format!(
            "Scan complete. Results saved to {}",
            job.destination.display()
        ));
    }

    Ok(results)
}

/// Validate `input`, scan it with `engine` and write the results.
///
/// Nothing is scanned or written unless the input is a valid CIDR block.
pub async fn scan_and_write<E: ScanEngine + ?Sized>(
    engine: &E,
    input: &str,
    format: OutputFormat,
    destination: &Path,
) -> CliResult<Vec<HostRecord>> {
    let job = ScanJob {
        target: CidrBlock::validate(input)?,
        format,
        destination: destination.to_path_buf(),
    };
    run_job(engine, &job, false).await
}

/// Check if running with root/admin privileges.
pub fn is_root() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
