//! Port lists for nmap's `-p` flag.
//!
//! Only the plain numeric forms are accepted: `80`, `80,443`, `1-1000` and
//! mixtures of them. Service names and protocol prefixes (`T:`, `U:`) are
//! rejected so a typo never reaches the engine.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Why a port list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("empty port specification")]
    Empty,
    #[error("'{0}' is not a port number")]
    NotANumber(String),
    #[error("port {0} is outside 1-65535")]
    OutOfRange(String),
    #[error("range {0}-{1} runs backwards")]
    Backwards(u16, u16),
}

/// A validated, normalized port list.
///
/// `Display` renders the form handed to nmap, e.g. `" 22, 80,8000-8010 "`
/// becomes `22,80,8000-8010`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    ranges: Vec<RangeInclusive<u16>>,
}

impl PortSpec {
    /// Number of ports covered. Overlapping pieces are counted twice.
    pub fn len(&self) -> usize {
        self.ranges
            .iter()
            .map(|r| usize::from(r.end() - r.start()) + 1)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn port_number(raw: &str) -> Result<u16, PortError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PortError::NotANumber(raw.to_string()));
    }
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(PortError::OutOfRange(raw.to_string())),
        Ok(port) => Ok(port),
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(PortError::Empty);
        }

        let ranges = s
            .split(',')
            .map(|piece| match piece.split_once('-') {
                Some((lo, hi)) => {
                    let (lo, hi) = (port_number(lo)?, port_number(hi)?);
                    if lo > hi {
                        return Err(PortError::Backwards(lo, hi));
                    }
                    Ok(lo..=hi)
                }
                None => port_number(piece).map(|p| p..=p),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { ranges })
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if range.start() == range.end() {
                write!(f, "{}", range.start())?;
            } else {
                write!(f, "{}-{}", range.start(), range.end())?;
            }
        }
        Ok(())
    }
}
