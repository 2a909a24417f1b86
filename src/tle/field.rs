#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric TLE [Field]s, as described by
/// <https://celestrak.org/columns/v04n03/>.
/// Angles are expressed in degrees, mean motion in revolutions per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Field {
    /// NORAD catalog number (line 1 & 2, columns 3-7)
    CatalogNumber,
    /// 2-digit epoch year (line 1, columns 19-20)
    EpochYear,
    /// Fractional day of year (line 1, columns 21-32), 1.0 = Jan 1st 00:00 UTC
    EpochDay,
    /// First derivative of mean motion, divided by two (rev/day²)
    MeanMotionDt,
    /// Second derivative of mean motion, divided by six (rev/day³)
    MeanMotionDdt,
    /// B* drag term (inverse Earth radii)
    BstarDrag,
    /// Ephemeris type (line 1, column 63)
    EphemerisType,
    /// Element set number (line 1, columns 65-68)
    ElementSetNumber,
    /// Inclination (degrees)
    Inclination,
    /// Right ascension of the ascending node (degrees)
    Raan,
    /// Eccentricity
    Eccentricity,
    /// Argument of perigee (degrees)
    ArgPerigee,
    /// Mean anomaly (degrees)
    MeanAnomaly,
    /// Mean motion (revolutions per day)
    MeanMotion,
    /// Revolution number at epoch
    RevolutionNumber,
}

impl Field {
    /// (line number, first column, last column), columns are 1-indexed and inclusive.
    /// [Field::CatalogNumber] is described by its line 1 location.
    pub(crate) const fn columns(&self) -> (u8, usize, usize) {
        match self {
            Self::CatalogNumber => (1, 3, 7),
            Self::EpochYear => (1, 19, 20),
            Self::EpochDay => (1, 21, 32),
            Self::MeanMotionDt => (1, 34, 43),
            Self::MeanMotionDdt => (1, 45, 52),
            Self::BstarDrag => (1, 54, 61),
            Self::EphemerisType => (1, 63, 63),
            Self::ElementSetNumber => (1, 65, 68),
            Self::Inclination => (2, 9, 16),
            Self::Raan => (2, 18, 25),
            Self::Eccentricity => (2, 27, 33),
            Self::ArgPerigee => (2, 35, 42),
            Self::MeanAnomaly => (2, 44, 51),
            Self::MeanMotion => (2, 53, 63),
            Self::RevolutionNumber => (2, 64, 68),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::CatalogNumber => write!(f, "catalog number"),
            Self::EpochYear => write!(f, "epoch year"),
            Self::EpochDay => write!(f, "epoch day"),
            Self::MeanMotionDt => write!(f, "mean motion 1st derivative"),
            Self::MeanMotionDdt => write!(f, "mean motion 2nd derivative"),
            Self::BstarDrag => write!(f, "B* drag"),
            Self::EphemerisType => write!(f, "ephemeris type"),
            Self::ElementSetNumber => write!(f, "element set number"),
            Self::Inclination => write!(f, "inclination"),
            Self::Raan => write!(f, "RAAN"),
            Self::Eccentricity => write!(f, "eccentricity"),
            Self::ArgPerigee => write!(f, "argument of perigee"),
            Self::MeanAnomaly => write!(f, "mean anomaly"),
            Self::MeanMotion => write!(f, "mean motion"),
            Self::RevolutionNumber => write!(f, "revolution number"),
        }
    }
}
