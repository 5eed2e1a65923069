//! Result types for subnet calculations.
//!
//! Everything here is built fresh per call and never mutated afterwards.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Serialize, Serializer};

use crate::family::Family;

/// Largest host-bit count whose address total is stated exactly.
///
/// Consumers commonly hold counts in an IEEE double, which is exact only up
/// to 2^53.
pub const MAX_EXACT_HOST_BITS: u8 = 53;

/// Number of addresses in a subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressCount {
    /// `2^host_bits` as an integer.
    Exact(u64),
    /// `2^host_bits`, too large to state exactly.
    Symbolic { host_bits: u8 },
}

impl AddressCount {
    /// Count of addresses spanned by `host_bits` free bits.
    #[must_use]
    pub fn from_host_bits(host_bits: u8) -> Self {
        if host_bits <= MAX_EXACT_HOST_BITS {
            Self::Exact(1u64 << host_bits)
        } else {
            Self::Symbolic { host_bits }
        }
    }

    #[must_use]
    pub fn exact(self) -> Option<u64> {
        match self {
            Self::Exact(n) => Some(n),
            Self::Symbolic { .. } => None,
        }
    }
}

impl fmt::Display for AddressCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Symbolic { host_bits } => write!(f, "2^{host_bits}"),
        }
    }
}

/// Exact counts serialize as numbers, symbolic ones as `"2^n"` strings.
impl Serialize for AddressCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Exact(n) => serializer.serialize_u64(*n),
            Self::Symbolic { .. } => serializer.collect_str(self),
        }
    }
}

/// Usable host count of an IPv4 subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsableHosts {
    Count(u64),
    /// A `/31` link: no network/broadcast distinction applies.
    PointToPoint,
}

impl UsableHosts {
    #[must_use]
    pub fn count(self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(n),
            Self::PointToPoint => None,
        }
    }
}

impl fmt::Display for UsableHosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::PointToPoint => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for UsableHosts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n),
            Self::PointToPoint => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

/// Text used wherever a value does not apply.
pub const NOT_APPLICABLE: &str = "N/A";

/// Calculated IPv4 subnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv4Subnet {
    /// Address as supplied
    pub address: Ipv4Addr,
    pub prefix_length: u8,
    /// `/n`
    pub cidr: String,
    pub mask: Ipv4Addr,
    pub wildcard: Ipv4Addr,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    /// `None` for `/31` and `/32`
    pub first_usable: Option<Ipv4Addr>,
    /// `None` for `/31` and `/32`
    pub last_usable: Option<Ipv4Addr>,
    pub total: u64,
    pub usable: UsableHosts,
}

/// Calculated IPv6 subnet.
///
/// All addresses are rendered as eight four-digit lowercase groups unless
/// the field name says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv6Subnet {
    pub address: String,
    pub prefix_length: u8,
    /// `/n`
    pub cidr: String,
    pub network: String,
    /// RFC 5952 form of `network`
    pub network_compressed: String,
    /// Leading groups covering the prefix (hextet granularity)
    pub network_portion: Vec<String>,
    /// Remaining groups
    pub host_portion: Vec<String>,
    pub host_bits: u8,
    pub total: AddressCount,
    /// Always equal to `total`; IPv6 reserves no broadcast address.
    pub usable: AddressCount,
}

/// Outcome of a successful calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum SubnetResult {
    V4(Ipv4Subnet),
    V6(Ipv6Subnet),
}

impl SubnetResult {
    #[must_use]
    pub fn family(&self) -> Family {
        match self {
            Self::V4(_) => Family::V4,
            Self::V6(_) => Family::V6,
        }
    }

    /// The `/n` suffix.
    #[must_use]
    pub fn cidr(&self) -> &str {
        match self {
            Self::V4(subnet) => &subnet.cidr,
            Self::V6(subnet) => &subnet.cidr,
        }
    }

    #[must_use]
    pub fn prefix_length(&self) -> u8 {
        match self {
            Self::V4(subnet) => subnet.prefix_length,
            Self::V6(subnet) => subnet.prefix_length,
        }
    }

    #[must_use]
    pub fn as_v4(&self) -> Option<&Ipv4Subnet> {
        match self {
            Self::V4(subnet) => Some(subnet),
            Self::V6(_) => None,
        }
    }

    #[must_use]
    pub fn as_v6(&self) -> Option<&Ipv6Subnet> {
        match self {
            Self::V6(subnet) => Some(subnet),
            Self::V4(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_count_boundary() {
        assert_eq!(AddressCount::from_host_bits(0), AddressCount::Exact(1));
        assert_eq!(
            AddressCount::from_host_bits(53),
            AddressCount::Exact(9_007_199_254_740_992)
        );
        assert_eq!(
            AddressCount::from_host_bits(54),
            AddressCount::Symbolic { host_bits: 54 }
        );
        assert_eq!(AddressCount::from_host_bits(128).to_string(), "2^128");
    }

    #[test]
    fn test_address_count_serialization() {
        let exact = serde_json::to_value(AddressCount::Exact(256)).unwrap();
        assert_eq!(exact, serde_json::json!(256));

        let symbolic = serde_json::to_value(AddressCount::Symbolic { host_bits: 64 }).unwrap();
        assert_eq!(symbolic, serde_json::json!("2^64"));
    }

    #[test]
    fn test_usable_hosts_point_to_point() {
        assert_eq!(UsableHosts::PointToPoint.to_string(), "N/A");
        assert_eq!(UsableHosts::PointToPoint.count(), None);
        assert_eq!(
            serde_json::to_value(UsableHosts::PointToPoint).unwrap(),
            serde_json::json!("N/A")
        );
        assert_eq!(UsableHosts::Count(254).count(), Some(254));
    }
}
