//! nmap-backed scan engine.
//!
//! Runs `nmap` as a child process, writes greppable output to a file in a
//! private scratch directory, and follows stdout to drive the progress bar.
//! Stderr is collected so a failing scan can be reported verbatim.

use super::greppable::GreppableParser;
use super::progress::ScanProgress;
use super::{ScanEngine, ScanOptions};
use crate::error::{ScanError, ScanResult};
use crate::types::{CidrBlock, HostRecord};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Default engine executable, looked up on `PATH`.
pub const DEFAULT_PROGRAM: &str = "nmap";

/// Markers nmap prints when a scan type needs root.
const PRIVILEGE_MARKERS: &[&str] = &["requires root privileges", "Operation not permitted"];

/// Scan engine that shells out to nmap.
#[derive(Debug, Clone)]
pub struct NmapEngine {
    program: PathBuf,
    options: ScanOptions,
}

impl NmapEngine {
    /// Create an engine using `program` with the given options.
    pub fn new(program: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self {
            program: program.into(),
            options,
        }
    }

    /// The options this engine passes to nmap.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Build the full argument list for scanning `target`.
    ///
    /// Layout: user args, `-p`, stats interval, greppable output file, target.
    pub fn build_args(&self, target: &CidrBlock, grep_file: &Path) -> Vec<String> {
        let mut args = self.options.args.clone();

        if let Some(ports) = &self.options.ports {
            args.push("-p".to_string());
            args.push(ports.to_string());
        }

        let secs = self.options.stats_interval.as_secs().max(1);
        args.push("--stats-every".to_string());
        args.push(format!("{}s", secs));

        args.push("-oG".to_string());
        args.push(grep_file.display().to_string());

        args.push(target.to_string());
        args
    }

    async fn run(&self, target: &CidrBlock, grep_file: &Path) -> ScanResult<Vec<HostRecord>> {
        let args = self.build_args(target, grep_file);
        debug!(program = %self.program.display(), ?args, "spawning scan engine");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ScanError::EngineNotFound(self.program.display().to_string()),
                ErrorKind::PermissionDenied => ScanError::PermissionDenied(format!(
                    "cannot execute '{}': {}",
                    self.program.display(),
                    e
                )),
                _ => ScanError::Io(e),
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ScanError::Io(std::io::Error::other("engine stdout unavailable")))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ScanError::Io(std::io::Error::other("engine stderr unavailable")))?;

        let mut progress = if self.options.show_progress {
            ScanProgress::new(target)
        } else {
            ScanProgress::hidden()
        };

        // Stdout only feeds the progress bar; a read error stops the bar, not the scan.
        let follow_stdout = async {
            let mut reader = BufReader::new(stdout);
            let mut line = Vec::new();
            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line).await {
                    Ok(0) => break,
                    Ok(_) => progress.observe(String::from_utf8_lossy(&line).trim_end()),
                    Err(e) => {
                        warn!("stopped following engine output: {}", e);
                        break;
                    }
                }
            }
        };
        let collect_stderr = async {
            let mut buf = Vec::new();
            if let Err(e) = stderr.read_to_end(&mut buf).await {
                warn!("failed to read engine stderr: {}", e);
            }
            String::from_utf8_lossy(&buf).into_owned()
        };

        let ((), stderr_text) = tokio::join!(follow_stdout, collect_stderr);
        let status = child.wait().await?;

        if !status.success() {
            return Err(classify_failure(status.code(), &stderr_text));
        }

        let content = tokio::fs::read(grep_file).await?;
        let hosts = GreppableParser::parse(&String::from_utf8_lossy(&content));
        progress.finish(&format!("{} host(s) up", hosts.len()));
        info!(cidr = %target, hosts = hosts.len(), "scan complete");

        Ok(hosts)
    }
}

impl Default for NmapEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, ScanOptions::default())
    }
}

#[async_trait]
impl ScanEngine for NmapEngine {
    fn name(&self) -> &str {
        "nmap"
    }

    async fn scan(&self, target: &CidrBlock) -> ScanResult<Vec<HostRecord>> {
        // nmap usually runs as root; never write to a guessable shared path.
        let scratch = tempfile::Builder::new().prefix("netsweep-").tempdir()?;
        let grep_file = scratch.path().join(format!("{}.gnmap", target.safe_label()));
        let result = self.run(target, &grep_file).await;

        if let Err(e) = scratch.close() {
            debug!("failed to remove scratch directory: {}", e);
        }

        result
    }
}

/// Map a non-zero engine exit to a [`ScanError`].
fn classify_failure(code: Option<i32>, stderr: &str) -> ScanError {
    let stderr = stderr.trim();

    if let Some(line) = stderr
        .lines()
        .find(|line| PRIVILEGE_MARKERS.iter().any(|m| line.contains(m)))
    {
        return ScanError::PermissionDenied(line.trim().to_string());
    }

    match code {
        None => ScanError::Interrupted,
        Some(code) => ScanError::EngineFailed {
            code: Some(code),
            stderr: stderr.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn block(s: &str) -> CidrBlock {
        s.parse().unwrap()
    }

    #[test]
    fn test_build_args_defaults() {
        let engine = NmapEngine::default();
        let args = engine.build_args(&block("192.168.1.0/24"), Path::new("/tmp/out.gnmap"));
        assert_eq!(
            args,
            vec![
                "-sS", "-sV", "-O", "-A", "-p", "1-1000", "--stats-every", "2s", "-oG",
                "/tmp/out.gnmap", "192.168.1.0/24",
            ]
        );
    }

    #[test]
    fn test_build_args_custom() {
        let options = ScanOptions::default()
            .with_args("-sT")
            .with_ports("22,80".parse().unwrap())
            .with_stats_interval(Duration::from_millis(10));
        let engine = NmapEngine::new("/usr/bin/nmap", options);
        let args = engine.build_args(&block("10.0.0.0/8"), Path::new("x.gnmap"));
        assert_eq!(
            args,
            vec!["-sT", "-p", "22,80", "--stats-every", "1s", "-oG", "x.gnmap", "10.0.0.0/8"]
        );
    }

    #[test]
    fn test_classify_privilege_failure() {
        let err = classify_failure(
            Some(1),
            "You requested a scan type which requires root privileges.\nQUITTING!\n",
        );
        assert!(matches!(err, ScanError::PermissionDenied(msg) if msg.ends_with("root privileges.")));
    }

    #[test]
    fn test_classify_other_failures() {
        assert!(matches!(classify_failure(None, ""), ScanError::Interrupted));
        assert!(matches!(
            classify_failure(Some(255), "Failed to resolve \"foo\".\n"),
            ScanError::EngineFailed { code: Some(255), .. }
        ));
    }

    #[test]
    fn test_missing_program() {
        let engine = NmapEngine::new(
            "/nonexistent/netsweep-test/nmap",
            ScanOptions::default().without_progress(),
        );
        let result = tokio_test::block_on(engine.scan(&block("127.0.0.1/32")));
        assert!(matches!(result, Err(ScanError::EngineNotFound(_))));
    }
}
