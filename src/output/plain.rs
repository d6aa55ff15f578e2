//! Plain text output formatting.
//!
//! One human-readable line per host:
//!
//! ```text
//! 10.0.0.5: 22/ssh, 80/http
//! 10.0.0.9: no open ports
//! ```

use crate::types::HostRecord;
use std::io::{self, Write};

/// Write results as plain text, one line per host.
pub fn write_plain<W: Write>(results: &[HostRecord], mut out: W) -> io::Result<()> {
    for host in results {
        writeln!(out, "{}", host_line(host))?;
    }
    out.flush()
}

/// Render a single host as `ip: port/service, ...`.
pub(crate) fn host_line(host: &HostRecord) -> String {
    if host.ports.is_empty() {
        return format!("{}: no open ports", host.ip);
    }

    let ports: Vec<String> = host.ports.iter().map(|p| p.to_string()).collect();
    format!("{}: {}", host.ip, ports.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        let results = vec![
            HostRecord::new("10.0.0.5")
                .with_port(22, "ssh")
                .with_port(80, "http"),
            HostRecord::new("10.0.0.9"),
        ];

        let mut buf = Vec::new();
        write_plain(&results, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "10.0.0.5: 22/ssh, 80/http\n10.0.0.9: no open ports\n"
        );
    }

    #[test]
    fn test_empty_results() {
        let mut buf = Vec::new();
        write_plain(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
