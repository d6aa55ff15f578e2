// nmap greppable (-oG) output parser.
//
// Host lines look like:
//   Host: 10.0.0.5 (db.lan)\tStatus: Up
//   Host: 10.0.0.5 (db.lan)\tPorts: 22/open/tcp//ssh//OpenSSH 8.9/, 80/closed/tcp//http///\tIgnored State: closed (998)
// Port entries are PORT/STATE/PROTOCOL/OWNER/SERVICE/RPC/VERSION/.

use crate::services;
use crate::types::{HostRecord, PortEntry};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Accumulates hosts from greppable output, preserving first-seen order.
#[derive(Debug, Default)]
pub struct GreppableParser {
    hosts: Vec<HostRecord>,
    index: HashMap<String, usize>,
}

impl GreppableParser {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete greppable document.
    pub fn parse(content: &str) -> Vec<HostRecord> {
        let mut parser = Self::new();
        for line in content.lines() {
            parser.feed_line(line);
        }
        parser.finish()
    }

    /// Consume one line of output. Comments and non-host lines are ignored.
    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.strip_prefix("Host:") else {
            return;
        };

        let mut fields = rest.split('\t');
        let Some(ip) = fields
            .next()
            .and_then(|head| head.split_whitespace().next())
        else {
            warn!("host line without address: {}", line);
            return;
        };

        for field in fields {
            if let Some(status) = field.strip_prefix("Status:") {
                if status.trim().eq_ignore_ascii_case("up") {
                    self.host_mut(ip);
                } else {
                    debug!("skipping host {} with status {}", ip, status.trim());
                }
            } else if let Some(ports) = field.strip_prefix("Ports:") {
                let host = self.host_mut(ip);
                for entry in split_port_entries(ports) {
                    if let Some((port, service)) = parse_open_port(&entry) {
                        host.ports.push(PortEntry::new(port, service));
                    }
                }
            }
        }
    }

    /// Return the hosts in the order they were first seen.
    pub fn finish(self) -> Vec<HostRecord> {
        self.hosts
    }

    fn host_mut(&mut self, ip: &str) -> &mut HostRecord {
        let idx = match self.index.get(ip) {
            Some(&idx) => idx,
            None => {
                self.hosts.push(HostRecord::new(ip));
                self.index.insert(ip.to_string(), self.hosts.len() - 1);
                self.hosts.len() - 1
            }
        };
        &mut self.hosts[idx]
    }
}

/// Split the `Ports:` field into entries.
///
/// Entries are separated by ", " but the version column may itself contain
/// commas, so a chunk that does not start with a port number is glued back
/// onto the previous entry.
fn split_port_entries(field: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for chunk in field.trim().split(", ") {
        let starts_entry = chunk
            .split_once('/')
            .is_some_and(|(num, _)| !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()));

        match entries.last_mut() {
            Some(last) if !starts_entry => {
                last.push_str(", ");
                last.push_str(chunk);
            }
            _ => entries.push(chunk.to_string()),
        }
    }
    entries
}

/// Parse one port entry, returning it only if the port is open.
fn parse_open_port(entry: &str) -> Option<(u16, String)> {
    let parts: Vec<&str> = entry.trim().split('/').collect();
    if parts.len() < 3 {
        warn!("malformed port entry: {}", entry);
        return None;
    }

    let port = match parts[0].parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!("malformed port number in entry: {}", entry);
            return None;
        }
    };

    if parts[1] != "open" {
        return None;
    }

    let reported = parts.get(4).copied().unwrap_or("");
    Some((port, services::resolve(port, reported)))
}
