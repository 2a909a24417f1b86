use thiserror::Error;

use hifitime::HifitimeError;

use crate::tle::Field;

/// TLE parsing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParsingError {
    #[error("tle line {0}: non ascii content")]
    NonAscii(u8),

    /// Both element lines must be exactly 69 columns wide,
    /// trailing whitespaces excluded.
    #[error("tle line {line}: invalid length {len} (expecting 69)")]
    LineLength { line: u8, len: usize },

    #[error("tle line {0}: invalid line number")]
    LineNumber(u8),

    /// Both element lines must describe the same satellite.
    #[error("catalog number mismatch between line 1 and line 2")]
    CatalogNumberMismatch,

    #[error("tle line {line}: invalid {field} field")]
    InvalidField { line: u8, field: Field },

    /// Only reported when [crate::prelude::ChecksumPolicy::Strict] applies.
    #[error("tle line {line}: checksum mismatch (expected {expected}, found {found})")]
    Checksum { line: u8, expected: u8, found: u8 },

    /// A TLE block requires a name and two element lines.
    #[error("incomplete tle set")]
    IncompleteSet,
}

/// Propagation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    #[error("eccentricity {0} out of [0, 1[")]
    Eccentricity(f64),

    #[error("mean motion {0} rev/day is not strictly positive")]
    MeanMotion(f64),

    #[error("non finite orbital element")]
    NonFiniteElement,

    /// Only the near-Earth model is supported.
    #[error("deep space element set (period {0:.3} min) is not supported")]
    DeepSpace(f64),

    /// Drag or perturbations drove the eccentricity out of range.
    #[error("perturbed eccentricity {0} out of range")]
    PerturbedEccentricity(f64),

    #[error("negative semi latus rectum")]
    SemiLatusRectum,

    /// Radius dropped below Earth's surface.
    #[error("satellite has decayed")]
    Decayed,

    #[error("propagation diverged (non finite state)")]
    Diverged,
}

/// Frame conversion errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Geodetic latitude did not converge within the iteration cap.
    #[error("geodetic latitude did not converge after {0} iterations")]
    NotConverged(usize),

    #[error("non finite coordinates")]
    NonFinite,

    #[error("invalid ground site coordinates")]
    InvalidSite,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("tle parsing: {0}")]
    Parsing(#[from] ParsingError),

    #[error("propagation: {0}")]
    Propagation(#[from] PropagationError),

    #[error("frame conversion: {0}")]
    Conversion(#[from] ConversionError),

    /// "now" could not be determined from the system clock.
    #[error("system clock: {0}")]
    Clock(#[from] HifitimeError),
}
