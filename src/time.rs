//! Continuous time scale used throughout propagation and frame conversions.
use std::f64::consts::TAU;

use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{constants::SECONDS_PER_DAY, error::Error};

/// Jan 1 2001 00:00 UTC, expressed as a Julian Date.
/// TLE ages are reported relative to this instant.
pub const REFERENCE_EPOCH_JAN1_2001: JulianDate = JulianDate(2451910.5);

/// J2000 (Jan 1 2000 12:00), expressed as a Julian Date.
const J2000_JD: f64 = 2451545.0;

const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

const CUMULATED_DAYS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Resolves the 4-digit year of a 2-digit TLE epoch year.
/// Element sets were first published in 1957: 57..=99 map to the 20th century,
/// 0..=56 to the 21st.
pub fn full_year(two_digit_year: u8) -> i32 {
    if two_digit_year < 57 {
        2000 + two_digit_year as i32
    } else {
        1900 + two_digit_year as i32
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0) && ((year % 100 != 0) || (year % 400 == 0))
}

/// [JulianDate] is a continuous day count, where the fractional part
/// is the time of day. Differences between two [JulianDate]s are
/// elapsed days.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JulianDate(f64);

impl JulianDate {
    /// Builds [JulianDate] from raw Julian days.
    pub const fn new(days: f64) -> Self {
        Self(days)
    }

    /// Returns Julian days.
    pub const fn days(&self) -> f64 {
        self.0
    }

    /// Julian date of day 0.0 of this year (Dec 31st, 00:00 UTC of the previous year).
    /// Meeus, Astronomical Formulae for Calculators.
    fn day_zero_of_year(year: i32) -> f64 {
        let y = year - 1;
        let a = y.div_euclid(100);
        let b = 2 - a + a.div_euclid(4);
        (365.25 * y as f64).floor() + (30.6001_f64 * 14.0).floor() + 1720994.5 + b as f64
    }

    /// Builds [JulianDate] from a 4-digit year and a fractional day of year,
    /// where 1.0 is Jan 1st 00:00 UTC. The fraction is not rounded, so the
    /// TLE epoch keeps its sub-second resolution.
    pub fn from_day_of_year(year: i32, day_of_year: f64) -> Self {
        Self(Self::day_zero_of_year(year) + day_of_year)
    }

    /// Builds [JulianDate] from UTC Gregorian calendar fields.
    pub fn from_gregorian(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
    ) -> Self {
        let month_index = (month.clamp(1, 12) - 1) as usize;
        let mut day_of_year = CUMULATED_DAYS[month_index] as f64 + day as f64;

        if month > 2 && is_leap_year(year) {
            day_of_year += 1.0;
        }

        let fraction = (hour as f64
            + minute as f64 / 60.0
            + (second as f64 + nanos as f64 * 1.0E-9) / 3600.0)
            / 24.0;

        Self::from_day_of_year(year, day_of_year + fraction)
    }

    /// Converts a platform [Epoch] (any time scale) to [JulianDate] (UTC).
    pub fn from_epoch(epoch: Epoch) -> Self {
        let (y, m, d, hh, mm, ss, ns) = epoch.to_gregorian_utc();
        Self::from_gregorian(y, m, d, hh, mm, ss, ns)
    }

    /// Current [JulianDate], from the system clock.
    pub fn now() -> Result<Self, Error> {
        let now = Epoch::now()?;
        Ok(Self::from_epoch(now))
    }

    /// Converts to [Epoch], expressed in UTC.
    pub fn to_epoch(&self) -> Epoch {
        Epoch::from_jde_utc(self.0)
    }

    /// Seconds elapsed from `rhs` to `self`.
    pub fn elapsed_seconds(&self, rhs: &Self) -> f64 {
        (self.0 - rhs.0) * SECONDS_PER_DAY
    }

    /// Minutes elapsed from `rhs` to `self`.
    pub fn elapsed_minutes(&self, rhs: &Self) -> f64 {
        self.elapsed_seconds(rhs) / 60.0
    }

    /// Returns [JulianDate] shifted by this amount of seconds.
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self(self.0 + seconds / SECONDS_PER_DAY)
    }

    /// Greenwich Mean Sidereal Time (radians, [0, 2π[), IAU-82 model.
    pub fn gmst_rad(&self) -> f64 {
        let ut = (self.0 + 0.5).rem_euclid(1.0);
        let tu = (self.0 - J2000_JD - ut) / DAYS_PER_JULIAN_CENTURY;

        let gmst = 24110.54841 + tu * (8640184.812866 + tu * (0.093104 - tu * 6.2E-6));

        let gmst = (gmst
            + SECONDS_PER_DAY * crate::constants::EARTH_ROTATION_SIDEREAL_PER_SOLAR * ut)
            .rem_euclid(SECONDS_PER_DAY);

        TAU * gmst / SECONDS_PER_DAY
    }

    /// Local Mean Sidereal Time (radians, [0, 2π[) at this East longitude (radians).
    pub fn lmst_rad(&self, longitude_rad: f64) -> f64 {
        (self.gmst_rad() + longitude_rad).rem_euclid(TAU)
    }
}

impl std::ops::Sub for JulianDate {
    type Output = f64;
    /// Elapsed days
    fn sub(self, rhs: Self) -> f64 {
        self.0 - rhs.0
    }
}

impl std::fmt::Display for JulianDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {:.8}", self.0)
    }
}
