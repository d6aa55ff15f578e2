//! Validated IPv4 CIDR blocks.
//!
//! A `CidrBlock` can only be obtained through [`CidrBlock::validate`] (or its
//! `FromStr` impl), so any value handed to a scan engine has already passed
//! validation.

use crate::error::ValidationError;
use ipnetwork::Ipv4Network;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// A syntactically valid IPv4 CIDR block (`A.B.C.D/N`).
///
/// Host bits are kept as entered; use [`CidrBlock::network`] for the
/// masked network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrBlock {
    address: Ipv4Addr,
    prefix: u8,
}

impl CidrBlock {
    /// Largest allowed prefix length.
    pub const MAX_PREFIX: u8 = 32;

    /// Validate user input and return the normalized block.
    ///
    /// Surrounding whitespace is ignored. Octets and the prefix must be plain
    /// decimal digits; signs, spaces inside the value and hex are rejected.
    pub fn validate(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::Empty);
        }

        let (addr_part, prefix_part) = input
            .split_once('/')
            .ok_or(ValidationError::MissingPrefix)?;

        let segments: Vec<&str> = addr_part.split('.').collect();
        if segments.len() != 4 {
            return Err(ValidationError::OctetCount(segments.len()));
        }

        let mut octets = [0u8; 4];
        for (slot, segment) in octets.iter_mut().zip(&segments) {
            *slot = parse_decimal(segment)
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(|| ValidationError::OctetOutOfRange(segment.to_string()))?;
        }

        let prefix = parse_decimal(prefix_part)
            .filter(|&v| v <= u32::from(Self::MAX_PREFIX))
            .ok_or_else(|| ValidationError::PrefixOutOfRange(prefix_part.to_string()))?;

        Ok(Self {
            address: Ipv4Addr::from(octets),
            prefix: prefix as u8,
        })
    }

    /// The address as entered (host bits preserved).
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Prefix length (0-32).
    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The network this block denotes, with host bits masked off.
    pub fn network(&self) -> Ipv4Network {
        // Prefix is bounded by validate(), so construction cannot fail.
        let net = Ipv4Network::new(self.address, self.prefix)
            .unwrap_or_else(|_| Ipv4Network::from(self.address));
        Ipv4Network::new(net.network(), self.prefix).unwrap_or(net)
    }

    /// Number of addresses covered by the block.
    pub fn host_count(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    /// Filesystem-safe label, e.g. `192_168_1_0_24`.
    pub fn safe_label(&self) -> String {
        self.to_string().replace(['.', '/'], "_")
    }
}

/// Parse a non-empty run of ASCII digits.
///
/// Leading zeros are accepted and normalized away. Values that overflow
/// `u32` are reported as `None`, which callers treat as out of range.
fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for CidrBlock {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cidr() {
        let block = CidrBlock::validate("192.168.1.0/24").unwrap();
        assert_eq!(block.address(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(block.prefix(), 24);
        assert_eq!(block.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn test_missing_prefix() {
        assert_eq!(
            CidrBlock::validate("192.168.1.0"),
            Err(ValidationError::MissingPrefix)
        );
    }

    #[test]
    fn test_octet_out_of_range() {
        let err = CidrBlock::validate("192.168.1.999/24").unwrap_err();
        assert_eq!(err.kind(), "OctetOutOfRange");
    }

    #[test]
    fn test_prefix_out_of_range() {
        let err = CidrBlock::validate("10.0.0.0/33").unwrap_err();
        assert_eq!(err, ValidationError::PrefixOutOfRange("33".to_string()));
    }

    #[test]
    fn test_whitespace_trimmed() {
        let block = CidrBlock::validate("  \t10.0.0.0/8 \n").unwrap();
        assert_eq!(block.to_string(), "10.0.0.0/8");
    }

    #[test]
    fn test_octet_count() {
        assert_eq!(
            CidrBlock::validate("10.0.0/8"),
            Err(ValidationError::OctetCount(3))
        );
        assert_eq!(
            CidrBlock::validate("10.0.0.0.0/8"),
            Err(ValidationError::OctetCount(5))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(CidrBlock::validate(""), Err(ValidationError::Empty));
        assert_eq!(CidrBlock::validate("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_non_numeric_segments() {
        assert!(matches!(
            CidrBlock::validate("10.a.0.0/8"),
            Err(ValidationError::OctetOutOfRange(_))
        ));
        assert!(matches!(
            CidrBlock::validate("10.+1.0.0/8"),
            Err(ValidationError::OctetOutOfRange(_))
        ));
        assert!(matches!(
            CidrBlock::validate("10..0.0/8"),
            Err(ValidationError::OctetOutOfRange(_))
        ));
        assert!(matches!(
            CidrBlock::validate("10.0.0.0/"),
            Err(ValidationError::PrefixOutOfRange(_))
        ));
        assert!(matches!(
            CidrBlock::validate("10.0.0.0/8/8"),
            Err(ValidationError::PrefixOutOfRange(_))
        ));
        assert!(matches!(
            CidrBlock::validate("10.0.0.0/-1"),
            Err(ValidationError::PrefixOutOfRange(_))
        ));
    }

    #[test]
    fn test_huge_numbers_are_out_of_range() {
        assert!(matches!(
            CidrBlock::validate("99999999999.0.0.0/8"),
            Err(ValidationError::OctetOutOfRange(_))
        ));
        assert!(matches!(
            CidrBlock::validate("10.0.0.0/99999999999"),
            Err(ValidationError::PrefixOutOfRange(_))
        ));
    }

    #[test]
    fn test_leading_zeros_normalized() {
        let block = CidrBlock::validate("010.000.001.002/08").unwrap();
        assert_eq!(block.to_string(), "10.0.1.2/8");
    }

    #[test]
    fn test_boundaries_accepted() {
        for prefix in 0..=32u8 {
            for octet in [0u8, 1, 127, 254, 255] {
                let input = format!("{octet}.{octet}.{octet}.{octet}/{prefix}");
                let block = CidrBlock::validate(&input).unwrap();
                assert_eq!(block.to_string(), input);
                assert_eq!(input.parse::<CidrBlock>().unwrap(), block);
            }
        }
    }

    #[test]
    fn test_network_masks_host_bits() {
        let block = CidrBlock::validate("192.168.1.77/24").unwrap();
        assert_eq!(block.address(), Ipv4Addr::new(192, 168, 1, 77));
        assert_eq!(block.network().network(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(block.network().prefix(), 24);
    }

    #[test]
    fn test_host_count() {
        assert_eq!(CidrBlock::validate("10.0.0.0/24").unwrap().host_count(), 256);
        assert_eq!(CidrBlock::validate("10.0.0.1/32").unwrap().host_count(), 1);
        assert_eq!(
            CidrBlock::validate("0.0.0.0/0").unwrap().host_count(),
            1u64 << 32
        );
    }

    #[test]
    fn test_safe_label() {
        let block = CidrBlock::validate("192.168.1.0/24").unwrap();
        assert_eq!(block.safe_label(), "192_168_1_0_24");
    }
}
