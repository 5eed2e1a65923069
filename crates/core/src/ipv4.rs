//! IPv4 subnet arithmetic.
//!
//! Input: `192.168.1.0/24` or `192.168.1.0/255.255.255.0`
//! Output: mask, wildcard, network, broadcast, usable range, counts

use std::net::Ipv4Addr;

use crate::address::{parse_decimal_prefix, parse_dotted_quad};
use crate::error::CalculationError;
use crate::types::{Ipv4Subnet, UsableHosts};

/// Address width in bits.
pub const IPV4_BITS: u8 = 32;

/// The part after `/` in an IPv4 expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4Suffix {
    /// Prefix length, 0-32
    Cidr(u8),
    /// Dotted mask, known to be contiguous
    Mask(Ipv4Addr),
}

impl Ipv4Suffix {
    /// Parse a decimal prefix length, or a dotted mask if the text contains `.`.
    pub fn parse(suffix: &str) -> Result<Self, CalculationError> {
        let invalid = || CalculationError::InvalidIPv4MaskOrCidr {
            suffix: suffix.to_string(),
        };

        if suffix.contains('.') {
            let mask = parse_dotted_quad(suffix)
                .map(Ipv4Addr::from)
                .ok_or_else(invalid)?;
            if mask_to_cidr(mask).is_none() {
                tracing::debug!(%mask, "rejected non-contiguous mask");
                return Err(invalid());
            }
            return Ok(Self::Mask(mask));
        }

        parse_decimal_prefix(suffix, IPV4_BITS)
            .map(Self::Cidr)
            .ok_or_else(invalid)
    }

    #[must_use]
    pub fn prefix_length(self) -> u8 {
        match self {
            Self::Cidr(prefix) => prefix,
            // Contiguity was checked in `parse`
            Self::Mask(mask) => u32::from(mask).count_ones() as u8,
        }
    }
}

/// Convert a prefix length to a netmask. Lengths above 32 saturate.
#[must_use]
pub fn cidr_to_mask(prefix: u8) -> Ipv4Addr {
    Ipv4Addr::from(prefix_to_mask(prefix))
}

fn prefix_to_mask(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p if p >= IPV4_BITS => u32::MAX,
        p => !0u32 << (IPV4_BITS - p),
    }
}

/// Count the mask's set bits, or `None` if they are not contiguous.
#[must_use]
pub fn mask_to_cidr(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let ones = bits.count_ones() as u8;
    (prefix_to_mask(ones) == bits).then_some(ones)
}

/// Evaluate `address/suffix`.
pub fn calculate_v4(address: Ipv4Addr, suffix: &str) -> Result<Ipv4Subnet, CalculationError> {
    let suffix = Ipv4Suffix::parse(suffix)?;
    tracing::trace!(?suffix, "parsed IPv4 suffix");
    Ok(subnet(address, suffix.prefix_length()))
}

/// Derive every subnet field for `address` under a prefix length.
#[must_use]
pub fn subnet(address: Ipv4Addr, prefix: u8) -> Ipv4Subnet {
    let prefix = prefix.min(IPV4_BITS);
    let mask = prefix_to_mask(prefix);
    let wildcard = !mask;
    let network = u32::from(address) & mask;
    let broadcast = network | wildcard;
    let total = 1u64 << (IPV4_BITS - prefix);

    let (usable, first_usable, last_usable) = match prefix {
        32 => (UsableHosts::Count(1), None, None),
        31 => (UsableHosts::PointToPoint, None, None),
        _ => (
            UsableHosts::Count(total - 2),
            Some(Ipv4Addr::from(network + 1)),
            Some(Ipv4Addr::from(broadcast - 1)),
        ),
    };

    Ipv4Subnet {
        address,
        prefix_length: prefix,
        cidr: format!("/{prefix}"),
        mask: Ipv4Addr::from(mask),
        wildcard: Ipv4Addr::from(wildcard),
        network: Ipv4Addr::from(network),
        broadcast: Ipv4Addr::from(broadcast),
        first_usable,
        last_usable,
        total,
        usable,
    }
}
