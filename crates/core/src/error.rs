//! Error type for subnet calculations.

use serde::Serialize;

use crate::family::Family;

/// Everything that can go wrong in a single [`calculate`](crate::calculate) call.
///
/// Every variant is terminal: a call either yields a complete result or
/// exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationError {
    /// No text was supplied (or only whitespace).
    #[error("empty input")]
    EmptyInput,

    /// The input has no `/` between address and suffix.
    #[error("missing '/' separator in {input:?}")]
    MissingSeparator { input: String },

    /// The address token is neither dotted nor colon-delimited.
    #[error("cannot determine address family of {token:?}")]
    UnknownFamily { token: String },

    /// An explicit family hint disagrees with the address shape.
    #[error("address looks like {detected} but {requested} was requested")]
    FamilyMismatch { detected: Family, requested: Family },

    /// Malformed IPv4 address.
    #[error("invalid IPv4 address: {address}")]
    #[serde(rename = "invalid_ipv4_address")]
    InvalidIPv4Address { address: String },

    /// CIDR outside [0, 32], or a malformed / non-contiguous dotted mask.
    #[error("invalid IPv4 mask or CIDR: {suffix}")]
    #[serde(rename = "invalid_ipv4_mask_or_cidr")]
    InvalidIPv4MaskOrCidr { suffix: String },

    /// Malformed IPv6 address.
    #[error("invalid IPv6 address: {address}")]
    #[serde(rename = "invalid_ipv6_address")]
    InvalidIPv6Address { address: String },

    /// Prefix length outside [0, 128] or not a decimal number.
    #[error("invalid IPv6 prefix length: {prefix}")]
    #[serde(rename = "invalid_ipv6_prefix_length")]
    InvalidIPv6PrefixLength { prefix: String },
}

impl CalculationError {
    /// Stable identifier for this error kind (matches the serialized `kind` tag).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::MissingSeparator { .. } => "missing_separator",
            Self::UnknownFamily { .. } => "unknown_family",
            Self::FamilyMismatch { .. } => "family_mismatch",
            Self::InvalidIPv4Address { .. } => "invalid_ipv4_address",
            Self::InvalidIPv4MaskOrCidr { .. } => "invalid_ipv4_mask_or_cidr",
            Self::InvalidIPv6Address { .. } => "invalid_ipv6_address",
            Self::InvalidIPv6PrefixLength { .. } => "invalid_ipv6_prefix_length",
        }
    }
}
