//! Structural validation of address tokens.
//!
//! The grammar differs from [`std::net`]'s parsers (leading zeros are fine,
//! embedded IPv4 is not) and each rejection maps to a specific
//! [`CalculationError`].

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::CalculationError;
use crate::family::Family;

/// A validated address, tagged by family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    V4 {
        /// Text as supplied by the caller
        text: String,
        value: u32,
    },
    V6 {
        /// Text as supplied by the caller
        text: String,
        groups: [u16; 8],
    },
}

impl Address {
    #[must_use]
    pub fn family(&self) -> Family {
        match self {
            Self::V4 { .. } => Family::V4,
            Self::V6 { .. } => Family::V6,
        }
    }

    /// The address exactly as it was written.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::V4 { text, .. } | Self::V6 { text, .. } => text,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 { value, .. } => write!(f, "{}", Ipv4Addr::from(*value)),
            Self::V6 { groups, .. } => f.write_str(&format_expanded(groups)),
        }
    }
}

// =============================================================================
// IPv4
// =============================================================================

/// Parse four dot-separated decimal octets.
///
/// Each octet is one to three ASCII digits with a value of at most 255.
pub fn parse_ipv4(token: &str) -> Result<Address, CalculationError> {
    let invalid = || CalculationError::InvalidIPv4Address {
        address: token.to_string(),
    };

    let octets = parse_dotted_quad(token).ok_or_else(invalid)?;

    Ok(Address::V4 {
        text: token.to_string(),
        value: u32::from_be_bytes(octets),
    })
}

/// Shared by address and dotted-mask parsing.
pub(crate) fn parse_dotted_quad(s: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');

    for octet in &mut octets {
        *octet = parse_octet(parts.next()?)?;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(octets)
}

/// Parse a decimal prefix length no larger than `max`.
pub(crate) fn parse_decimal_prefix(s: &str, max: u8) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u8>().ok().filter(|&prefix| prefix <= max)
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Three digits always fit in u16
    part.parse::<u16>().ok()?.try_into().ok()
}

// =============================================================================
// IPv6
// =============================================================================

const COMPRESSION_MARKER: &str = "::";

/// Parse an IPv6 address in colon-hex notation with optional `::`.
///
/// Embedded dotted-quad suffixes and zone identifiers are not accepted.
pub fn parse_ipv6(token: &str) -> Result<Address, CalculationError> {
    Ok(Address::V6 {
        text: token.to_string(),
        groups: ipv6_groups(token)?,
    })
}

/// Expand an IPv6 address to eight zero-padded lowercase groups.
///
/// Idempotent: expanding an already-expanded address returns it unchanged.
pub fn expand_ipv6(token: &str) -> Result<String, CalculationError> {
    ipv6_groups(token).map(|groups| format_expanded(&groups))
}

fn ipv6_groups(token: &str) -> Result<[u16; 8], CalculationError> {
    parse_groups(token).ok_or_else(|| {
        tracing::debug!(token, "rejected IPv6 address");
        CalculationError::InvalidIPv6Address {
            address: token.to_string(),
        }
    })
}

/// Render eight groups as `xxxx:xxxx:...`.
#[must_use]
pub fn format_expanded(groups: &[u16; 8]) -> String {
    format_groups(groups).join(":")
}

/// Render each group as four lowercase hex digits.
#[must_use]
pub fn format_groups(groups: &[u16]) -> Vec<String> {
    groups.iter().map(|g| format!("{g:04x}")).collect()
}

/// RFC 5952 compressed text for eight groups.
#[must_use]
pub fn format_compressed(groups: &[u16; 8]) -> String {
    Ipv6Addr::from(*groups).to_string()
}

fn parse_groups(s: &str) -> Option<[u16; 8]> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit() || b == b':') {
        return None;
    }

    let mut groups = [0u16; 8];

    match s.split_once(COMPRESSION_MARKER) {
        None => {
            let parts = split_side(s)?;
            if parts.len() != 8 {
                return None;
            }
            groups.copy_from_slice(&parts);
        }
        Some((head, tail)) => {
            // A second marker, or ":::" leaves empty groups in the tail
            let head = split_side(head)?;
            let tail = split_side(tail)?;
            if head.len() + tail.len() >= 8 {
                return None;
            }
            groups[..head.len()].copy_from_slice(&head);
            groups[8 - tail.len()..].copy_from_slice(&tail);
        }
    }

    Some(groups)
}

/// Parse one side of the compression marker. An empty side has no groups.
fn split_side(side: &str) -> Option<Vec<u16>> {
    if side.is_empty() {
        return Some(Vec::new());
    }
    side.split(':').map(parse_group).collect()
}

fn parse_group(group: &str) -> Option<u16> {
    if group.is_empty() || group.len() > 4 {
        return None;
    }
    u16::from_str_radix(group, 16).ok()
}
