use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod checksum;
pub use checksum::ChecksumPolicy;

/// Configuration Error
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown checksum policy")]
    UnknownChecksumPolicy,
}

fn default_max_iterations() -> usize {
    10
}

fn default_tolerance_rad() -> f64 {
    1.0E-7
}

/// Geodetic latitude resolution options. The ellipsoid correction
/// is iterative: it stops once two consecutive latitudes differ by less than
/// `tolerance_rad`, or fails after `max_iterations`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticOpts {
    /// Iteration cap
    #[cfg_attr(feature = "serde", serde(default = "default_max_iterations"))]
    pub max_iterations: usize,
    /// Convergence criteria (radians). 1E-7 rad is about 0.6 m on ground.
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance_rad"))]
    pub tolerance_rad: f64,
}

impl Default for GeodeticOpts {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance_rad: default_tolerance_rad(),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// TLE checksum verification policy.
    /// [ChecksumPolicy::Strict] is the default value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub checksum: ChecksumPolicy,
    /// Geodetic conversion options.
    #[cfg_attr(feature = "serde", serde(default))]
    pub geodetic: GeodeticOpts,
}

impl Config {
    /// [Config] preset that rejects any inconsistent element set.
    pub fn strict() -> Self {
        let mut s = Self::default();
        s.checksum = ChecksumPolicy::Strict;
        s
    }

    /// [Config] preset that tolerates checksum mismatches (reported as warnings).
    /// You can then customize [Self] as you will.
    pub fn lenient() -> Self {
        let mut s = Self::default();
        s.checksum = ChecksumPolicy::Advisory;
        s
    }

    /// Copies and returns [Config] with desired [ChecksumPolicy].
    pub fn with_checksum_policy(&self, policy: ChecksumPolicy) -> Self {
        let mut s = self.clone();
        s.checksum = policy;
        s
    }
}
