//! Ground observation site and topocentric look angles.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConversionError, frame::GeodeticPosition, sgp4::EciState};

/// Topocentric look angle, from a [GroundSite] to a target.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LookAngle {
    /// Azimuth (degrees, [0, 360[, clockwise from North)
    pub azimuth_deg: f64,
    /// Elevation (degrees, [-90, 90]). Negative when the target is below the horizon.
    pub elevation_deg: f64,
    /// Slant range (km)
    pub range_km: f64,
    /// Range rate (km/s), positive when the target is moving away.
    pub range_rate_km_s: f64,
}

impl LookAngle {
    /// True when the target is above the local horizon.
    pub fn is_visible(&self) -> bool {
        self.elevation_deg > 0.0
    }
}

/// [GroundSite] is a fixed observation point, on the WGS-72 ellipsoid.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundSite {
    geodetic: GeodeticPosition,
}

impl GroundSite {
    /// Builds new [GroundSite] from latitude (degrees, positive North),
    /// East positive longitude (degrees) and altitude (km).
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
    ) -> Result<Self, ConversionError> {
        if !(latitude_deg.is_finite() && longitude_deg.is_finite() && altitude_km.is_finite()) {
            return Err(ConversionError::InvalidSite);
        }

        if latitude_deg.abs() > 90.0 {
            return Err(ConversionError::InvalidSite);
        }

        Ok(Self {
            geodetic: GeodeticPosition::new(latitude_deg, longitude_deg, altitude_km),
        })
    }

    /// Site coordinates
    pub fn geodetic(&self) -> &GeodeticPosition {
        &self.geodetic
    }

    /// Returns [LookAngle] to this target, at the target's time tag.
    /// The range vector is rotated into the South-East-Zenith frame
    /// (Kelso, Orbital Coordinate Systems part III).
    pub fn look_angle(&self, target: &EciState) -> LookAngle {
        let observer = self.geodetic.to_eci(target.t);

        let range = target.position_km - observer.position_km;
        let range_rate = target.velocity_km_s - observer.velocity_km_s;

        let (sin_lat, cos_lat) = self.geodetic.latitude_deg.to_radians().sin_cos();
        let theta = target.t.lmst_rad(self.geodetic.longitude_deg.to_radians());
        let (sin_theta, cos_theta) = theta.sin_cos();

        let top_s = sin_lat * cos_theta * range[0] + sin_lat * sin_theta * range[1]
            - cos_lat * range[2];

        let top_e = -sin_theta * range[0] + cos_theta * range[1];

        let top_z = cos_lat * cos_theta * range[0]
            + cos_lat * sin_theta * range[1]
            + sin_lat * range[2];

        let range_km = range.norm();

        let mut azimuth = top_e.atan2(-top_s).to_degrees().rem_euclid(360.0);

        // rem_euclid may round up to 360.0 for tiny negative angles
        if azimuth >= 360.0 {
            azimuth = 0.0;
        }

        let elevation = if range_km > 0.0 {
            (top_z / range_km).clamp(-1.0, 1.0).asin().to_degrees()
        } else {
            90.0
        };

        let range_rate_km_s = if range_km > 0.0 {
            range.dot(&range_rate) / range_km
        } else {
            0.0
        };

        LookAngle {
            azimuth_deg: azimuth,
            elevation_deg: elevation,
            range_km,
            range_rate_km_s,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::time::JulianDate;

    #[test]
    fn site_validation() {
        assert!(GroundSite::new(48.85, 2.35, 0.035).is_ok());
        assert!(GroundSite::new(-90.0, -180.0, 0.0).is_ok());

        for (lat, lon, alt) in [
            (90.1, 0.0, 0.0),
            (-91.0, 0.0, 0.0),
            (f64::NAN, 0.0, 0.0),
            (0.0, f64::INFINITY, 0.0),
            (0.0, 0.0, f64::NAN),
        ] {
            assert_eq!(
                GroundSite::new(lat, lon, alt),
                Err(ConversionError::InvalidSite)
            );
        }
    }

    #[test]
    fn cardinal_directions() {
        let t = JulianDate::from_gregorian(2022, 11, 17, 12, 0, 0, 0);
        let site = GroundSite::new(0.0, 0.0, 0.0).unwrap();

        let zenith = GeodeticPosition::new(0.0, 0.0, 500.0).to_eci(t);
        let look = site.look_angle(&zenith);
        assert!(look.elevation_deg > 89.99);
        assert!((look.range_km - 500.0).abs() < 1.0E-6);
        assert!(look.range_rate_km_s.abs() < 1.0E-9);
        assert!(look.is_visible());

        // due North, slightly above the horizon
        let north = GeodeticPosition::new(5.0, 0.0, 800.0).to_eci(t);
        let look = site.look_angle(&north);
        assert!(look.azimuth_deg < 1.0E-6 || look.azimuth_deg > 360.0 - 1.0E-6);
        assert!(look.azimuth_deg < 360.0);
        assert!(look.elevation_deg > 0.0);

        let east = GeodeticPosition::new(0.0, 5.0, 800.0).to_eci(t);
        let look = site.look_angle(&east);
        assert!((look.azimuth_deg - 90.0).abs() < 1.0E-6);

        let south = GeodeticPosition::new(-5.0, 0.0, 800.0).to_eci(t);
        let look = site.look_angle(&south);
        assert!((look.azimuth_deg - 180.0).abs() < 1.0E-6);

        let west = GeodeticPosition::new(0.0, -5.0, 800.0).to_eci(t);
        let look = site.look_angle(&west);
        assert!((look.azimuth_deg - 270.0).abs() < 1.0E-6);
    }

    #[test]
    fn below_horizon() {
        let t = JulianDate::from_gregorian(2022, 11, 17, 12, 0, 0, 0);
        let site = GroundSite::new(0.0, 0.0, 0.0).unwrap();

        let antipode = GeodeticPosition::new(0.0, 180.0, 500.0).to_eci(t);
        let look = site.look_angle(&antipode);
        assert!(look.elevation_deg < -89.0);
        assert!(!look.is_visible());
    }

    #[test]
    fn range_rate_sign() {
        let t = JulianDate::from_gregorian(2022, 11, 17, 12, 0, 0, 0);
        let site = GroundSite::new(0.0, 0.0, 0.0).unwrap();

        let mut target = GeodeticPosition::new(0.0, 0.0, 500.0).to_eci(t);
        // climbing straight up
        target.velocity_km_s += target.position_km.normalize() * 2.0;

        let look = site.look_angle(&target);
        assert!((look.range_rate_km_s - 2.0).abs() < 1.0E-6);

        target.velocity_km_s -= target.position_km.normalize() * 4.0;
        let look = site.look_angle(&target);
        assert!((look.range_rate_km_s + 2.0).abs() < 1.0E-6);
    }
}
