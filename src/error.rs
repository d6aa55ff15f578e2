//! Error types for netsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Every failure ends the
//! run; there is no retry or partial recovery.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected CIDR input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty CIDR range")]
    Empty,

    #[error("missing prefix length (expected A.B.C.D/N)")]
    MissingPrefix,

    #[error("expected 4 octets, found {0}")]
    OctetCount(usize),

    #[error("octet '{0}' is not an integer in 0-255")]
    OctetOutOfRange(String),

    #[error("prefix length '{0}' is not an integer in 0-32")]
    PrefixOutOfRange(String),
}

impl ValidationError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::MissingPrefix => "MissingPrefix",
            Self::OctetCount(_) => "OctetCount",
            Self::OctetOutOfRange(_) => "OctetOutOfRange",
            Self::PrefixOutOfRange(_) => "PrefixOutOfRange",
        }
    }
}

/// Failure of the external scan engine.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("scan engine not found at '{0}' (is nmap installed?)")]
    EngineNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("scan engine exited with {}: {stderr}", exit_label(.code))]
    EngineFailed { code: Option<i32>, stderr: String },

    #[error("scan interrupted")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

/// Failure to persist scan results.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("cannot write to '{}': {source}", .path.display())]
    PathUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize results: {0}")]
    Serialize(String),
}

impl From<csv::Error> for WriteError {
    fn from(e: csv::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}

impl From<serde_json::Error> for WriteError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read '{}': {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid port specification: {0}")]
    InvalidPorts(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}

/// Top-level error returned by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid CIDR format: {0}. Please use the correct format like 192.168.1.0/24.")]
    Validation(#[from] ValidationError),

    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Write failed: {0}")]
    Write(#[from] WriteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Scan(_) => 3,
            Self::Write(_) => 4,
            Self::Config(_) | Self::Prompt(_) | Self::Other(_) => 1,
        }
    }
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for writer operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
