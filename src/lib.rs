//! # netsweep - CIDR-range scanning on top of nmap
//!
//! netsweep validates an IPv4 CIDR range, hands it to an external scan
//! engine (nmap), shows progress while the engine runs, and writes the
//! discovered hosts and open ports to a file.
//!
//! ## Features
//!
//! - **Strict CIDR validation**: typed errors for a missing prefix, a wrong
//!   octet count, and out-of-range octets or prefixes
//! - **Pluggable engine**: the [`scanner::ScanEngine`] trait hides nmap, so
//!   tests and other tools can supply their own results
//! - **Progress display**: driven by nmap's periodic status lines
//! - **Multiple Output Formats**: plain text, CSV, JSON, greppable and XML
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use netsweep::cli::OutputFormat;
//! use netsweep::scanner::NmapEngine;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let engine = NmapEngine::default();
//!     let hosts = netsweep::scan_and_write(
//!         &engine,
//!         "192.168.1.0/24",
//!         OutputFormat::Json,
//!         Path::new("scan.json"),
//!     )
//!     .await
//!     .unwrap();
//!
//!     println!("{} hosts up", hosts.len());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - `CidrBlock` (the validator) and per-host result records
//! - [`scanner`] - The `ScanEngine` trait and the nmap implementation
//! - [`output`] - Result writer and terminal messages
//! - [`config`] - Settings file handling
//! - [`cli`] - Argument parsing, prompts and the scan flow
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use cli::{scan_and_write, OutputFormat};
pub use error::{CliError, ScanError, ValidationError, WriteError};
pub use scanner::{NmapEngine, ScanEngine};
pub use types::{CidrBlock, HostRecord, PortEntry};
