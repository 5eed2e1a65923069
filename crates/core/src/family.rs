//! Address family detection.
//!
//! The family is decided once, from the textual shape of the address token,
//! and everything downstream dispatches on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalculationError;

/// IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Address width in bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::V4 => 32,
            Self::V6 => 128,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => f.write_str("IPv4"),
            Self::V6 => f.write_str("IPv6"),
        }
    }
}

/// Caller-supplied family preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyHint {
    /// Defer to detection.
    #[default]
    Auto,
    V4,
    V6,
}

impl FamilyHint {
    /// The family this hint insists on, if any.
    #[must_use]
    pub const fn family(self) -> Option<Family> {
        match self {
            Self::Auto => None,
            Self::V4 => Some(Family::V4),
            Self::V6 => Some(Family::V6),
        }
    }
}

impl fmt::Display for FamilyHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::V4 => f.write_str("v4"),
            Self::V6 => f.write_str("v6"),
        }
    }
}

/// Error returned when a family hint string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown address family {0:?} (expected auto, v4 or v6)")]
pub struct ParseFamilyHintError(String);

impl FromStr for FamilyHint {
    type Err = ParseFamilyHintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "v4" | "4" | "ipv4" => Ok(Self::V4),
            "v6" | "6" | "ipv6" => Ok(Self::V6),
            _ => Err(ParseFamilyHintError(s.to_string())),
        }
    }
}

impl From<Family> for FamilyHint {
    fn from(family: Family) -> Self {
        match family {
            Family::V4 => Self::V4,
            Family::V6 => Self::V6,
        }
    }
}

/// Guess the family from the address token alone.
///
/// A `.` means IPv4 and wins over `:`; a `:` means IPv6.
pub fn detect_family(token: &str) -> Result<Family, CalculationError> {
    if token.contains('.') {
        Ok(Family::V4)
    } else if token.contains(':') {
        Ok(Family::V6)
    } else {
        tracing::debug!(token, "address token has neither '.' nor ':'");
        Err(CalculationError::UnknownFamily {
            token: token.to_string(),
        })
    }
}

/// Detect the family and check it against an explicit hint.
pub fn resolve_family(token: &str, hint: FamilyHint) -> Result<Family, CalculationError> {
    let detected = detect_family(token)?;

    match hint.family() {
        Some(requested) if requested != detected => {
            tracing::debug!(%detected, %requested, "family hint conflicts with address shape");
            Err(CalculationError::FamilyMismatch {
                detected,
                requested,
            })
        }
        _ => Ok(detected),
    }
}
