//! Scanner module - the seam between netsweep and the external scan engine.
//!
//! netsweep never probes the network itself. A [`ScanEngine`] takes a
//! validated [`CidrBlock`] and returns per-host results; the production
//! implementation drives `nmap` as a subprocess.

pub mod greppable;
pub mod nmap;
pub mod progress;

use crate::error::ScanResult;
use crate::types::{CidrBlock, HostRecord, PortSpec};
use async_trait::async_trait;
use std::time::Duration;

pub use nmap::NmapEngine;
pub use progress::ScanProgress;

/// Default nmap arguments: SYN scan, version and OS detection, scripts.
pub const DEFAULT_NMAP_ARGS: &[&str] = &["-sS", "-sV", "-O", "-A"];

/// Default port range handed to the engine.
pub const DEFAULT_PORTS: &str = "1-1000";

/// Flags that make nmap require root/administrator privileges.
const PRIVILEGED_FLAGS: &[&str] = &["-sS", "-sU", "-sA", "-sW", "-sM", "-sN", "-sF", "-sX", "-O", "-A"];

/// Trait for scan engine implementations.
///
/// Abstracts the external scanner so it can be swapped, or replaced by a
/// canned implementation in tests.
///
/// # Example
///
/// ```ignore
/// use netsweep::scanner::ScanEngine;
/// use netsweep::types::CidrBlock;
///
/// async fn count_hosts<E: ScanEngine>(engine: &E) -> usize {
///     let target: CidrBlock = "192.168.1.0/24".parse().unwrap();
///     engine.scan(&target).await.map(|hosts| hosts.len()).unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait ScanEngine: Send + Sync {
    /// Human-readable engine name for messages.
    fn name(&self) -> &str;

    /// Scan the block and return one record per responding host.
    ///
    /// This call blocks (asynchronously) for the whole scan.
    async fn scan(&self, target: &CidrBlock) -> ScanResult<Vec<HostRecord>>;
}

/// Options passed through to the scan engine.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Raw engine arguments (e.g. `-sS -sV`).
    pub args: Vec<String>,
    /// Ports to scan; `None` leaves the engine's default.
    pub ports: Option<PortSpec>,
    /// How often the engine should report progress.
    pub stats_interval: Duration,
    /// Render a progress bar while scanning.
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            args: DEFAULT_NMAP_ARGS.iter().map(|s| s.to_string()).collect(),
            ports: DEFAULT_PORTS.parse().ok(),
            stats_interval: Duration::from_secs(2),
            show_progress: true,
        }
    }
}

impl ScanOptions {
    /// Replace the raw engine arguments, splitting on whitespace.
    pub fn with_args(mut self, args: &str) -> Self {
        self.args = args.split_whitespace().map(str::to_string).collect();
        self
    }

    /// Set the port specification.
    pub fn with_ports(mut self, ports: PortSpec) -> Self {
        self.ports = Some(ports);
        self
    }

    /// Set the progress reporting interval.
    pub fn with_stats_interval(mut self, interval: Duration) -> Self {
        self.stats_interval = interval;
        self
    }

    /// Disable the progress bar.
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check if these options need elevated privileges.
    pub fn requires_privileges(&self) -> bool {
        self.args
            .iter()
            .any(|a| PRIVILEGED_FLAGS.contains(&a.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ScanOptions::default();
        assert_eq!(options.args, vec!["-sS", "-sV", "-O", "-A"]);
        assert_eq!(options.ports.as_ref().map(|p| p.to_string()), Some("1-1000".to_string()));
        assert!(options.requires_privileges());
    }

    #[test]
    fn test_unprivileged_args() {
        let options = ScanOptions::default().with_args("  -sT   -sV ");
        assert_eq!(options.args, vec!["-sT", "-sV"]);
        assert!(!options.requires_privileges());
    }
}
