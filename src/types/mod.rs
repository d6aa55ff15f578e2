//! Core type definitions using newtype patterns for type safety.
//!
//! A `CidrBlock` can only be built by validating input, which keeps
//! unvalidated ranges away from the scan engine.

mod cidr;
mod host;
mod port;

pub use cidr::CidrBlock;
pub use host::{HostRecord, PortEntry};
pub use port::{PortError, PortSpec};
