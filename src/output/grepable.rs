//! Greppable output formatting, compatible with nmap's `-oG` layout.
//!
//! Ports are written as `PORT/open/tcp//SERVICE///`; records carry no
//! protocol, so TCP is assumed.

use crate::types::HostRecord;
use std::io::{self, Write};

/// Write results in greppable form: a status line per host, plus a ports
/// line for hosts with open ports.
pub fn write_grepable<W: Write>(results: &[HostRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "# netsweep {} greppable output", env!("CARGO_PKG_VERSION"))?;

    for host in results {
        writeln!(out, "Host: {} ()\tStatus: Up", host.ip)?;

        if !host.ports.is_empty() {
            let ports: Vec<String> = host
                .ports
                .iter()
                .map(|p| format!("{}/open/tcp//{}///", p.port, p.service.replace('/', "|")))
                .collect();
            writeln!(out, "Host: {} ()\tPorts: {}", host.ip, ports.join(", "))?;
        }
    }

    out.flush()
}
