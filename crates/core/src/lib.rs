//! Subnetcalc Core
//!
//! Pure IPv4/IPv6 subnet arithmetic. Give it `address/prefix` and get the
//! network boundaries, address counts and usable range back.
//!
//! # Quick Start
//!
//! ```
//! use subnetcalc_core::{calculate, UsableHosts};
//!
//! let result = calculate("192.168.1.0/24").unwrap();
//! let v4 = result.as_v4().unwrap();
//!
//! assert_eq!(v4.mask.to_string(), "255.255.255.0");
//! assert_eq!(v4.broadcast.to_string(), "192.168.1.255");
//! assert_eq!(v4.usable, UsableHosts::Count(254));
//! ```
//!
//! # IPv6
//!
//! Counts above 2^53 are reported symbolically rather than rounded:
//!
//! ```
//! use subnetcalc_core::calculate;
//!
//! let result = calculate("2001:db8::/64").unwrap();
//! let v6 = result.as_v6().unwrap();
//!
//! assert_eq!(v6.network, "2001:0db8:0000:0000:0000:0000:0000:0000");
//! assert_eq!(v6.total.to_string(), "2^64");
//! ```
//!
//! # Forcing a family
//!
//! ```
//! use subnetcalc_core::{calculate_with_hint, CalculationError, FamilyHint};
//!
//! let err = calculate_with_hint("10.0.0.0/8", FamilyHint::V6).unwrap_err();
//! assert!(matches!(err, CalculationError::FamilyMismatch { .. }));
//! ```

pub mod address;
pub mod error;
pub mod family;
pub mod ipv4;
pub mod ipv6;
pub mod types;

pub use address::{expand_ipv6, parse_ipv4, parse_ipv6, Address};
pub use error::CalculationError;
pub use family::{detect_family, resolve_family, Family, FamilyHint, ParseFamilyHintError};
pub use ipv4::{cidr_to_mask, mask_to_cidr, Ipv4Suffix};
pub use types::*;

use std::net::Ipv4Addr;

/// Separator between address and suffix.
const SEPARATOR: char = '/';

/// Evaluate an `address/suffix` expression, detecting the family.
///
/// # Examples
///
/// ```
/// use subnetcalc_core::{calculate, Family};
///
/// let result = calculate("::1/128").unwrap();
/// assert_eq!(result.family(), Family::V6);
/// assert_eq!(result.as_v6().unwrap().total.exact(), Some(1));
/// ```
pub fn calculate(input: &str) -> Result<SubnetResult, CalculationError> {
    calculate_with_hint(input, FamilyHint::Auto)
}

/// Evaluate an `address/suffix` expression, checking the family against `hint`.
///
/// The suffix is a decimal prefix length for either family, or a dotted
/// mask for IPv4. Surrounding whitespace is ignored.
pub fn calculate_with_hint(
    input: &str,
    hint: FamilyHint,
) -> Result<SubnetResult, CalculationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CalculationError::EmptyInput);
    }

    let (token, suffix) =
        input
            .split_once(SEPARATOR)
            .ok_or_else(|| CalculationError::MissingSeparator {
                input: input.to_string(),
            })?;
    let (token, suffix) = (token.trim(), suffix.trim());

    let family = resolve_family(token, hint)?;
    tracing::debug!(%family, token, suffix, "calculating subnet");

    let address = match family {
        Family::V4 => parse_ipv4(token)?,
        Family::V6 => parse_ipv6(token)?,
    };

    match address {
        Address::V4 { value, .. } => {
            ipv4::calculate_v4(Ipv4Addr::from(value), suffix).map(SubnetResult::V4)
        }
        Address::V6 { groups, .. } => ipv6::calculate_v6(&groups, suffix).map(SubnetResult::V6),
    }
}
