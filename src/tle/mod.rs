//! Two-Line Element sets
use itertools::Itertools;
use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cfg::ChecksumPolicy,
    error::ParsingError,
    time::{full_year, JulianDate},
};

mod field;
mod format;

pub use field::Field;

use format::{
    checksum, columns, parse_float, parse_implied_decimal, parse_implied_exponent,
    parse_integer, parse_unsigned, LINE_WIDTH,
};

/// [Tle] is an orbital element set, parsed from its name line and
/// the two fixed-column element lines. [Tle] is immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tle {
    name: String,
    catalog_number: u32,
    classification: char,
    international_designator: String,
    epoch_year: u8,
    epoch_day: f64,
    mean_motion_dt: f64,
    mean_motion_ddt: f64,
    bstar: f64,
    ephemeris_type: u32,
    element_set_number: u32,
    inclination_deg: f64,
    raan_deg: f64,
    eccentricity: f64,
    arg_perigee_deg: f64,
    mean_anomaly_deg: f64,
    mean_motion_rev_per_day: f64,
    revolution_number: u32,
    checksums: (u8, u8),
}

/// Verifies basic line format: ASCII, width and line number.
/// Returns the line without trailing whitespaces.
fn prepare_line(line: &str, nb: u8) -> Result<&str, ParsingError> {
    let line = line.trim_end();

    if !line.is_ascii() {
        return Err(ParsingError::NonAscii(nb));
    }

    if line.len() != LINE_WIDTH {
        return Err(ParsingError::LineLength {
            line: nb,
            len: line.len(),
        });
    }

    let expected = (b'0' + nb) as char;
    if !line.starts_with(expected) || columns(line, 2, 2) != " " {
        return Err(ParsingError::LineNumber(nb));
    }

    Ok(line)
}

/// Verifies the line checksum according to [ChecksumPolicy].
/// Returns the checksum found in column 69, or the computed one
/// when it is not readable and not verified.
fn verify_checksum(line: &str, nb: u8, policy: ChecksumPolicy) -> Result<u8, ParsingError> {
    let expected = checksum(line);

    let found = columns(line, LINE_WIDTH, LINE_WIDTH)
        .parse::<u8>()
        .ok();

    match (policy, found) {
        (ChecksumPolicy::Ignore, found) => Ok(found.unwrap_or(expected)),
        (_, Some(found)) if found == expected => Ok(found),
        (ChecksumPolicy::Strict, found) => Err(ParsingError::Checksum {
            line: nb,
            expected,
            found: found.unwrap_or(u8::MAX),
        }),
        (ChecksumPolicy::Advisory, found) => {
            warn!(
                "tle line {}: checksum mismatch (expected {}, found {:?})",
                nb, expected, found
            );
            Ok(found.unwrap_or(expected))
        },
    }
}

/// Name line content, without the "0 " prefix of the three-line (3LE) format.
fn prepare_name(name: &str) -> String {
    let name = name.trim();
    match name.strip_prefix("0 ") {
        Some(stripped) => stripped.trim().to_string(),
        None => name.to_string(),
    }
}

impl Tle {
    /// Parses [Tle] from its name and both element lines,
    /// with [ChecksumPolicy::Strict].
    pub fn parse(name: &str, line1: &str, line2: &str) -> Result<Self, ParsingError> {
        Self::parse_with_policy(name, line1, line2, ChecksumPolicy::Strict)
    }

    /// Parses [Tle] from its name and both element lines,
    /// verifying checksums with desired [ChecksumPolicy].
    pub fn parse_with_policy(
        name: &str,
        line1: &str,
        line2: &str,
        policy: ChecksumPolicy,
    ) -> Result<Self, ParsingError> {
        let line1 = prepare_line(line1, 1)?;
        let line2 = prepare_line(line2, 2)?;

        let checksum1 = verify_checksum(line1, 1, policy)?;
        let checksum2 = verify_checksum(line2, 2, policy)?;

        // catalog number is located on the same columns on both lines
        let catalog_number = parse_integer(line1, 1, Field::CatalogNumber)?;
        let catalog_number2 = parse_integer(line2, 2, Field::CatalogNumber)?;

        if catalog_number != catalog_number2 {
            return Err(ParsingError::CatalogNumberMismatch);
        }

        let classification = line1.as_bytes()[7] as char;
        let international_designator = columns(line1, 10, 17).trim().to_string();

        let epoch_year = parse_integer(line1, 1, Field::EpochYear)?;
        let epoch_year = u8::try_from(epoch_year)
            .ok()
            .filter(|yy| *yy < 100)
            .ok_or(ParsingError::InvalidField {
                line: 1,
                field: Field::EpochYear,
            })?;

        let epoch_day = parse_float(line1, 1, Field::EpochDay)?;
        if !(1.0..367.0).contains(&epoch_day) {
            return Err(ParsingError::InvalidField {
                line: 1,
                field: Field::EpochDay,
            });
        }

        let tle = Self {
            name: prepare_name(name),
            catalog_number,
            classification,
            international_designator,
            epoch_year,
            epoch_day,
            mean_motion_dt: parse_float(line1, 1, Field::MeanMotionDt)?,
            mean_motion_ddt: parse_implied_exponent(line1, 1, Field::MeanMotionDdt)?,
            bstar: parse_implied_exponent(line1, 1, Field::BstarDrag)?,
            ephemeris_type: parse_unsigned(line1, 1, Field::EphemerisType)?,
            element_set_number: parse_unsigned(line1, 1, Field::ElementSetNumber)?,
            inclination_deg: parse_float(line2, 2, Field::Inclination)?,
            raan_deg: parse_float(line2, 2, Field::Raan)?,
            eccentricity: parse_implied_decimal(line2, 2, Field::Eccentricity)?,
            arg_perigee_deg: parse_float(line2, 2, Field::ArgPerigee)?,
            mean_anomaly_deg: parse_float(line2, 2, Field::MeanAnomaly)?,
            mean_motion_rev_per_day: parse_float(line2, 2, Field::MeanMotion)?,
            revolution_number: parse_unsigned(line2, 2, Field::RevolutionNumber)?,
            checksums: (checksum1, checksum2),
        };

        debug!(
            "tle \"{}\" ({:05}): epoch {}, n={:.8} rev/day, e={:.7}, i={:.4}°",
            tle.name,
            tle.catalog_number,
            tle.epoch(),
            tle.mean_motion_rev_per_day,
            tle.eccentricity,
            tle.inclination_deg,
        );

        Ok(tle)
    }

    /// Returns numerical value of this [Field].
    /// Angles are expressed in degrees, mean motion in revolutions per day.
    pub fn field(&self, field: Field) -> f64 {
        match field {
            Field::CatalogNumber => self.catalog_number as f64,
            Field::EpochYear => self.epoch_year as f64,
            Field::EpochDay => self.epoch_day,
            Field::MeanMotionDt => self.mean_motion_dt,
            Field::MeanMotionDdt => self.mean_motion_ddt,
            Field::BstarDrag => self.bstar,
            Field::EphemerisType => self.ephemeris_type as f64,
            Field::ElementSetNumber => self.element_set_number as f64,
            Field::Inclination => self.inclination_deg,
            Field::Raan => self.raan_deg,
            Field::Eccentricity => self.eccentricity,
            Field::ArgPerigee => self.arg_perigee_deg,
            Field::MeanAnomaly => self.mean_anomaly_deg,
            Field::MeanMotion => self.mean_motion_rev_per_day,
            Field::RevolutionNumber => self.revolution_number as f64,
        }
    }

    /// Satellite name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// NORAD catalog number
    pub fn catalog_number(&self) -> u32 {
        self.catalog_number
    }

    /// Classification (U: unclassified, C: classified, S: secret)
    pub fn classification(&self) -> char {
        self.classification
    }

    /// International designator (launch year, launch number, piece).
    /// Might be empty.
    pub fn international_designator(&self) -> &str {
        &self.international_designator
    }

    /// 4-digit epoch year, resolved with the [full_year] century rule.
    pub fn epoch_year(&self) -> i32 {
        full_year(self.epoch_year)
    }

    /// Fractional day of year, 1.0 being Jan 1st 00:00 UTC.
    pub fn epoch_day(&self) -> f64 {
        self.epoch_day
    }

    /// Epoch of this element set.
    pub fn epoch(&self) -> JulianDate {
        JulianDate::from_day_of_year(self.epoch_year(), self.epoch_day)
    }

    /// B* drag term (inverse Earth radii)
    pub fn bstar(&self) -> f64 {
        self.bstar
    }

    /// Inclination (degrees)
    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    /// Right ascension of ascending node (degrees)
    pub fn raan_deg(&self) -> f64 {
        self.raan_deg
    }

    /// Eccentricity
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Argument of perigee (degrees)
    pub fn arg_perigee_deg(&self) -> f64 {
        self.arg_perigee_deg
    }

    /// Mean anomaly (degrees)
    pub fn mean_anomaly_deg(&self) -> f64 {
        self.mean_anomaly_deg
    }

    /// Mean motion (revolutions per day)
    pub fn mean_motion_rev_per_day(&self) -> f64 {
        self.mean_motion_rev_per_day
    }

    /// Element set number, incremented on each new publication
    pub fn element_set_number(&self) -> u32 {
        self.element_set_number
    }

    /// Revolution number at epoch
    pub fn revolution_number(&self) -> u32 {
        self.revolution_number
    }

    /// Line 1 and line 2 checksums, as found in column 69.
    pub fn checksums(&self) -> (u8, u8) {
        self.checksums
    }
}

impl std::str::FromStr for Tle {
    type Err = ParsingError;

    /// Parses a [Tle] block: a name line followed by both element lines.
    /// The name line may be omitted. Checksums are strictly verified.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s
            .lines()
            .map(|line| line.trim_end())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();

        match lines.as_slice() {
            [name, line1, line2] => Self::parse(name, line1, line2),
            [line1, line2] => Self::parse("", line1, line2),
            _ => Err(ParsingError::IncompleteSet),
        }
    }
}

impl std::fmt::Display for Tle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:05})", self.name, self.catalog_number)
    }
}

/// Parses all [Tle]s contained in a catalog text, as distributed by CelesTrak
/// (name line and two element lines per satellite, CRLF or LF terminated).
pub fn parse_catalog(content: &str, policy: ChecksumPolicy) -> Result<Vec<Tle>, ParsingError> {
    let lines = content
        .lines()
        .map(|line| line.trim_end())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    if lines.len() % 3 != 0 {
        return Err(ParsingError::IncompleteSet);
    }

    lines
        .into_iter()
        .tuples()
        .map(|(name, line1, line2)| Tle::parse_with_policy(name, line1, line2, policy))
        .collect()
}
