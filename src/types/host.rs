//! Per-host scan results as produced by a scan engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An open port and the service detected on it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortEntry {
    /// Port number.
    pub port: u16,
    /// Service name (e.g. "ssh"), "unknown" when nothing was detected.
    pub service: String,
}

impl PortEntry {
    /// Create a new port entry.
    pub fn new(port: u16, service: impl Into<String>) -> Self {
        Self {
            port,
            service: service.into(),
        }
    }
}

impl fmt::Display for PortEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.service)
    }
}

/// Results for one host: its address and the open ports found on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// IP address as reported by the engine.
    pub ip: String,
    /// Open ports in the order the engine reported them.
    pub ports: Vec<PortEntry>,
}

impl HostRecord {
    /// Create a host record with no open ports.
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ports: Vec::new(),
        }
    }

    /// Add an open port.
    pub fn with_port(mut self, port: u16, service: impl Into<String>) -> Self {
        self.ports.push(PortEntry::new(port, service));
        self
    }

    /// Flatten into `(ip, port, service)` tuples, one per open port.
    pub fn tuples(&self) -> impl Iterator<Item = (&str, u16, &str)> + '_ {
        self.ports
            .iter()
            .map(move |p| (self.ip.as_str(), p.port, p.service.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_builder() {
        let host = HostRecord::new("10.0.0.5")
            .with_port(22, "ssh")
            .with_port(80, "http");

        assert_eq!(host.ports.len(), 2);
        assert_eq!(host.ports[1].to_string(), "80/http");

        let tuples: Vec<_> = host.tuples().collect();
        assert_eq!(
            tuples,
            vec![("10.0.0.5", 22, "ssh"), ("10.0.0.5", 80, "http")]
        );
    }

    #[test]
    fn test_json_shape() {
        let host = HostRecord::new("10.0.0.5").with_port(22, "ssh");
        let value = serde_json::to_value(&host).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"ip": "10.0.0.5", "ports": [{"port": 22, "service": "ssh"}]})
        );
    }
}
