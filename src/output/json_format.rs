//! JSON output formatting.

use crate::error::{WriteError, WriteResult};
use crate::types::HostRecord;
use std::io::Write;

/// Write results as a pretty-printed JSON array, one object per host.
pub fn write_json<W: Write>(results: &[HostRecord], mut out: W) -> WriteResult<()> {
    serde_json::to_writer_pretty(&mut out, results)?;
    out.write_all(b"\n")
        .map_err(|e| WriteError::Serialize(e.to_string()))?;
    Ok(())
}
