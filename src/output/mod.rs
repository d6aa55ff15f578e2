//! Result writer.
//!
//! Serializes host records to a file in one of the supported formats, and
//! provides the styled terminal messages used by the CLI.

mod csv_format;
mod grepable;
mod json_format;
mod plain;
mod terminal;
mod xml_format;

pub use csv_format::write_csv;
pub use grepable::write_grepable;
pub use json_format::write_json;
pub use plain::write_plain;
pub use xml_format::write_xml;
pub use terminal::{print_error, print_hosts, print_scan_header, print_success, print_warning};

use crate::cli::OutputFormat;
use crate::error::{WriteError, WriteResult};
use crate::types::{CidrBlock, HostRecord};
use chrono::{DateTime, TimeZone};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Serialize `results` to `out` in the given format.
pub fn render<W: Write>(results: &[HostRecord], format: OutputFormat, out: W) -> WriteResult<()> {
    match format {
        OutputFormat::Plain => write_plain(results, out).map_err(io_to_serialize),
        OutputFormat::Csv => write_csv(results, out),
        OutputFormat::Json => write_json(results, out),
        OutputFormat::Grepable => write_grepable(results, out).map_err(io_to_serialize),
        OutputFormat::Xml => write_xml(results, out),
    }
}

/// Serialize `results` into a string.
pub fn render_to_string(results: &[HostRecord], format: OutputFormat) -> WriteResult<String> {
    let mut buf = Vec::new();
    render(results, format, &mut buf)?;
    String::from_utf8(buf).map_err(|e| WriteError::Serialize(e.to_string()))
}

/// Write `results` to `destination`, creating or truncating it.
///
/// The file is written in a single pass; on failure it may be left partial.
pub fn write_results(
    results: &[HostRecord],
    format: OutputFormat,
    destination: &Path,
) -> WriteResult<()> {
    let unwritable = |source: io::Error| WriteError::PathUnwritable {
        path: destination.to_path_buf(),
        source,
    };

    let content = render_to_string(results, format)?;

    let file = File::create(destination).map_err(unwritable)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).map_err(unwritable)?;
    writer.flush().map_err(unwritable)?;

    debug!(
        path = %destination.display(),
        %format,
        hosts = results.len(),
        "results written"
    );
    Ok(())
}

/// Generate a unique output file name for a scan.
///
/// Format: `nmap_scan_<target>_<YYYYmmdd_HHMMSS>.<ext>`, e.g.
/// `nmap_scan_192_168_1_0_24_20261019_101500.json`.
pub fn default_file_name<Tz: TimeZone>(
    target: &CidrBlock,
    format: OutputFormat,
    at: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "nmap_scan_{}_{}.{}",
        target.safe_label(),
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

fn io_to_serialize(e: io::Error) -> WriteError {
    WriteError::Serialize(e.to_string())
}
