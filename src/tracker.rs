//! Satellite tracker: TLE in, ground track (and look angle) out.
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cfg::Config,
    error::Error,
    frame::GeodeticPosition,
    sgp4::Satellite,
    site::{GroundSite, LookAngle},
    time::{JulianDate, REFERENCE_EPOCH_JAN1_2001},
    tle::Tle,
};

/// Converts an East longitude in [0, 360[ to a signed longitude in ]-180, 180],
/// West being negative.
pub fn signed_longitude(longitude_deg: f64) -> f64 {
    if longitude_deg > 180.0 {
        longitude_deg - 360.0
    } else {
        longitude_deg
    }
}

/// [PositionReport] describes the satellite at the requested instant.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionReport {
    /// Age of the element set: seconds elapsed from Jan 1 2001 00:00 UTC to the TLE epoch.
    pub age_seconds: f64,
    /// Geodetic latitude (degrees, positive North)
    pub latitude_deg: f64,
    /// Longitude (degrees, ]-180, 180], positive East)
    pub longitude_deg: f64,
    /// Altitude above the ellipsoid (km)
    pub altitude_km: f64,
    /// [LookAngle] from the ground site, when one was specified.
    pub look_angle: Option<LookAngle>,
}

/// [Tracker] resolves [PositionReport]s, following its [Config].
/// It has no internal state and may be shared between threads.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tracker {
    cfg: Config,
}

impl Tracker {
    /// Builds new [Tracker] from desired [Config].
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// [Config] currently applied.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Parses this element set and resolves the satellite position at `t`.
    pub fn position_at(
        &self,
        name: &str,
        line1: &str,
        line2: &str,
        t: JulianDate,
    ) -> Result<PositionReport, Error> {
        let tle = Tle::parse_with_policy(name, line1, line2, self.cfg.checksum)?;
        self.report(&tle, None, t)
    }

    /// Parses this element set and resolves the satellite position at `t`,
    /// and its [LookAngle] from the ground site.
    /// The site longitude is East positive (degrees) and its altitude is in km.
    #[allow(clippy::too_many_arguments)]
    pub fn position_and_look_angle_at(
        &self,
        name: &str,
        line1: &str,
        line2: &str,
        site_latitude_deg: f64,
        site_longitude_deg: f64,
        site_altitude_km: f64,
        t: JulianDate,
    ) -> Result<PositionReport, Error> {
        let tle = Tle::parse_with_policy(name, line1, line2, self.cfg.checksum)?;
        let site = GroundSite::new(site_latitude_deg, site_longitude_deg, site_altitude_km)?;
        self.report(&tle, Some(&site), t)
    }

    /// Resolves the [PositionReport] of a parsed [Tle] at `t`,
    /// with optional [LookAngle] from this [GroundSite].
    pub fn report(
        &self,
        tle: &Tle,
        site: Option<&GroundSite>,
        t: JulianDate,
    ) -> Result<PositionReport, Error> {
        let satellite = Satellite::from_tle(tle)?;
        let state = satellite.state_at(t)?;

        let geodetic = GeodeticPosition::from_eci(&state.position_km, t, &self.cfg.geodetic)?;

        let look_angle = site.map(|site| site.look_angle(&state));

        let age_seconds = tle.epoch().elapsed_seconds(&REFERENCE_EPOCH_JAN1_2001);

        debug!(
            "{} - {}: lat={:.4}° lon={:.4}° alt={:.3}km",
            t, tle, geodetic.latitude_deg, geodetic.longitude_deg, geodetic.altitude_km,
        );

        Ok(PositionReport {
            age_seconds,
            latitude_deg: geodetic.latitude_deg,
            longitude_deg: signed_longitude(geodetic.longitude_deg),
            altitude_km: geodetic.altitude_km,
            look_angle,
        })
    }
}

/// Resolves the current satellite position, from this element set,
/// using the default [Config].
pub fn compute_position(name: &str, line1: &str, line2: &str) -> Result<PositionReport, Error> {
    let now = JulianDate::now()?;
    Tracker::default().position_at(name, line1, line2, now)
}

/// Resolves the current satellite position and its [LookAngle] from this ground site,
/// using the default [Config].
pub fn compute_position_and_look_angle(
    name: &str,
    line1: &str,
    line2: &str,
    site_latitude_deg: f64,
    site_longitude_deg: f64,
    site_altitude_km: f64,
) -> Result<PositionReport, Error> {
    let now = JulianDate::now()?;
    Tracker::default().position_and_look_angle_at(
        name,
        line1,
        line2,
        site_latitude_deg,
        site_longitude_deg,
        site_altitude_km,
        now,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn longitude_convention() {
        assert_eq!(signed_longitude(0.0), 0.0);
        assert_eq!(signed_longitude(90.0), 90.0);
        assert_eq!(signed_longitude(180.0), 180.0);
        assert_eq!(signed_longitude(190.0), -170.0);
        assert_eq!(signed_longitude(270.0), -90.0);
        assert!((signed_longitude(359.9) + 0.1).abs() < 1.0E-9);
    }
}
