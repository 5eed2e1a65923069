//! IPv6 subnet arithmetic.
//!
//! Input: `2001:db8::/64`
//! Output: expanded network, network/host hextets, address count

use std::net::Ipv6Addr;

use crate::address::{format_compressed, format_expanded, format_groups, parse_decimal_prefix};
use crate::error::CalculationError;
use crate::types::{AddressCount, Ipv6Subnet};

/// Address width in bits.
pub const IPV6_BITS: u8 = 128;

const HEXTET_BITS: u8 = 16;

/// Parse a decimal prefix length in [0, 128].
pub fn parse_prefix_length(suffix: &str) -> Result<u8, CalculationError> {
    parse_decimal_prefix(suffix, IPV6_BITS).ok_or_else(|| {
        tracing::debug!(suffix, "rejected IPv6 prefix length");
        CalculationError::InvalidIPv6PrefixLength {
            prefix: suffix.to_string(),
        }
    })
}

/// Keep the first `prefix` bits and zero the rest.
#[must_use]
pub fn network_address(groups: &[u16; 8], prefix: u8) -> [u16; 8] {
    let bits = u128::from(Ipv6Addr::from(*groups));
    Ipv6Addr::from(bits & prefix_to_mask(prefix)).segments()
}

fn prefix_to_mask(prefix: u8) -> u128 {
    match prefix {
        0 => 0,
        p if p >= IPV6_BITS => u128::MAX,
        p => !0u128 << (IPV6_BITS - p),
    }
}

/// Addresses covered by a prefix of this length.
#[must_use]
pub fn address_count(prefix: u8) -> AddressCount {
    AddressCount::from_host_bits(IPV6_BITS - prefix.min(IPV6_BITS))
}

/// Split the groups into network and host hextets.
///
/// The split point is `ceil(prefix / 16)`, so a prefix that ends inside a
/// hextet puts that whole hextet on the network side.
#[must_use]
pub fn split_portions(groups: &[u16; 8], prefix: u8) -> (Vec<String>, Vec<String>) {
    let at = usize::from(prefix.min(IPV6_BITS)).div_ceil(usize::from(HEXTET_BITS));
    let (network, host) = groups.split_at(at);
    (format_groups(network), format_groups(host))
}

/// Evaluate `address/suffix` for an already-validated address.
pub fn calculate_v6(groups: &[u16; 8], suffix: &str) -> Result<Ipv6Subnet, CalculationError> {
    let prefix = parse_prefix_length(suffix)?;
    Ok(subnet(groups, prefix))
}

/// Derive every subnet field for the address under a prefix length.
#[must_use]
pub fn subnet(groups: &[u16; 8], prefix: u8) -> Ipv6Subnet {
    let prefix = prefix.min(IPV6_BITS);
    let network = network_address(groups, prefix);
    let (network_portion, host_portion) = split_portions(groups, prefix);
    let total = address_count(prefix);

    Ipv6Subnet {
        address: format_expanded(groups),
        prefix_length: prefix,
        cidr: format!("/{prefix}"),
        network: format_expanded(&network),
        network_compressed: format_compressed(&network),
        network_portion,
        host_portion,
        host_bits: IPV6_BITS - prefix,
        total,
        usable: total,
    }
}
