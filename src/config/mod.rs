//! Configuration management for netsweep.
//!
//! Provides XDG-compliant settings storage: the nmap binary, its arguments,
//! and output defaults.

mod settings;

pub use settings::{AppSettings, Paths};
