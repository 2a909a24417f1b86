use crate::cfg::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// TLE checksum verification policy
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChecksumPolicy {
    /// Any checksum mismatch rejects the element set.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "strict"))]
    Strict,

    /// Checksum mismatches are reported as warnings,
    /// the element set is still used. Some historical sets
    /// (test vectors in particular) do not carry a valid checksum.
    #[cfg_attr(feature = "serde", serde(alias = "advisory"))]
    Advisory,

    /// Checksums are not verified.
    #[cfg_attr(feature = "serde", serde(alias = "ignore"))]
    Ignore,
}

impl std::fmt::Display for ChecksumPolicy {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Strict => write!(fmt, "strict"),
            Self::Advisory => write!(fmt, "advisory"),
            Self::Ignore => write!(fmt, "ignore"),
        }
    }
}

impl std::str::FromStr for ChecksumPolicy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "advisory" | "warn" => Ok(Self::Advisory),
            "ignore" | "none" => Ok(Self::Ignore),
            _ => Err(Error::UnknownChecksumPolicy),
        }
    }
}
