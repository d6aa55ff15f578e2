//! CSV output formatting.

use crate::error::{WriteError, WriteResult};
use crate::types::HostRecord;
use std::io::Write;

/// Write results as CSV: header `ip,port,service`, one row per open port.
///
/// Hosts without open ports produce no rows.
pub fn write_csv<W: Write>(results: &[HostRecord], out: W) -> WriteResult<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["ip", "port", "service"])?;

    for host in results {
        for (ip, port, service) in host.tuples() {
            wtr.write_record([ip, &port.to_string(), service])?;
        }
    }

    wtr.flush()
        .map_err(|e| WriteError::Serialize(e.to_string()))
}
