//! Application settings and paths.
//!
//! Settings live in an XDG-compliant location
//! (`~/.config/netsweep/settings.json` on Linux). Every field is optional in
//! the file; missing fields take their defaults.

use crate::cli::OutputFormat;
use crate::error::{ConfigError, ConfigResult};
use crate::scanner::nmap::DEFAULT_PROGRAM;
use crate::scanner::{ScanOptions, DEFAULT_NMAP_ARGS, DEFAULT_PORTS};
use crate::types::PortSpec;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/netsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform directories. Nothing is created on disk.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "netsweep", "netsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// nmap executable (name on PATH or absolute path).
    pub nmap_path: PathBuf,
    /// Raw nmap arguments, whitespace separated.
    pub nmap_args: String,
    /// Port specification passed with `-p`.
    pub ports: String,
    /// Format offered as the default at the prompt.
    pub default_format: OutputFormat,
    /// Directory for generated output file names; cwd when unset.
    pub output_dir: Option<PathBuf>,
    /// Seconds between nmap progress reports.
    pub stats_interval_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            nmap_path: PathBuf::from(DEFAULT_PROGRAM),
            nmap_args: DEFAULT_NMAP_ARGS.join(" "),
            ports: DEFAULT_PORTS.to_string(),
            default_format: OutputFormat::default(),
            output_dir: None,
            stats_interval_secs: 2,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, or defaults if absent.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Build engine options from these settings.
    ///
    /// `ports` overrides the configured port specification when given.
    pub fn scan_options(&self, ports: Option<&str>) -> ConfigResult<ScanOptions> {
        let raw = ports.unwrap_or(&self.ports);
        let spec: PortSpec = raw
            .parse()
            .map_err(|e| ConfigError::InvalidPorts(format!("'{}': {}", raw, e)))?;

        Ok(ScanOptions::default()
            .with_args(&self.nmap_args)
            .with_ports(spec)
            .with_stats_interval(Duration::from_secs(self.stats_interval_secs)))
    }
}
