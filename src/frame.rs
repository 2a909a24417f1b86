//! ECI <=> geodetic conversions, on the WGS-72 ellipsoid.
use std::f64::consts::TAU;

use log::debug;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cfg::GeodeticOpts,
    constants::{EARTH_ANGULAR_VEL_RAD_S, EARTH_EQUATORIAL_RADIUS_KM, EARTH_FLATTENING},
    error::ConversionError,
    sgp4::EciState,
    time::JulianDate,
};

/// Geodetic coordinates, above the WGS-72 ellipsoid.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticPosition {
    /// Geodetic latitude (degrees, positive North)
    pub latitude_deg: f64,
    /// East longitude (degrees). Conversions from ECI
    /// always express it in [0, 360[.
    pub longitude_deg: f64,
    /// Altitude above the ellipsoid (km)
    pub altitude_km: f64,
}

impl GeodeticPosition {
    /// Builds [GeodeticPosition] from raw coordinates.
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
        }
    }

    /// Converts this ECI position (km) at `t` to [GeodeticPosition].
    /// The geodetic latitude is solved iteratively (Kelso, Orbital Coordinate Systems part III),
    /// capped by [GeodeticOpts::max_iterations].
    pub fn from_eci(
        position_km: &Vector3<f64>,
        t: JulianDate,
        opts: &GeodeticOpts,
    ) -> Result<Self, ConversionError> {
        let (x, y, z) = (position_km[0], position_km[1], position_km[2]);

        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(ConversionError::NonFinite);
        }

        let theta = y.atan2(x);
        let longitude = (theta - t.gmst_rad()).rem_euclid(TAU);

        let r = (x * x + y * y).sqrt();
        let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);

        let mut latitude = z.atan2(r);
        let mut converged = false;

        for iter in 0..opts.max_iterations {
            let phi = latitude;
            let sin_phi = phi.sin();

            let c = 1.0 / (1.0 - e2 * sin_phi * sin_phi).sqrt();
            latitude = (z + EARTH_EQUATORIAL_RADIUS_KM * c * e2 * sin_phi).atan2(r);

            if (latitude - phi).abs() <= opts.tolerance_rad {
                debug!("geodetic latitude converged in {} iterations", iter + 1);
                converged = true;
                break;
            }
        }

        if !converged {
            return Err(ConversionError::NotConverged(opts.max_iterations));
        }

        let (sin_lat, cos_lat) = latitude.sin_cos();
        let c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();

        // valid at any latitude, including the polar axis (r = 0)
        let altitude = r * cos_lat + (z + e2 * EARTH_EQUATORIAL_RADIUS_KM * c * sin_lat) * sin_lat
            - EARTH_EQUATORIAL_RADIUS_KM * c;

        if !altitude.is_finite() {
            return Err(ConversionError::NonFinite);
        }

        Ok(Self {
            latitude_deg: latitude.to_degrees(),
            longitude_deg: longitude.to_degrees(),
            altitude_km: altitude,
        })
    }

    /// Converts this fixed [GeodeticPosition] to [EciState] at `t`.
    /// The inertial velocity is solely due to Earth rotation.
    pub fn to_eci(&self, t: JulianDate) -> EciState {
        let latitude = self.latitude_deg.to_radians();
        let theta = t.lmst_rad(self.longitude_deg.to_radians());

        let (sin_lat, cos_lat) = latitude.sin_cos();

        let c = 1.0
            / (1.0 + EARTH_FLATTENING * (EARTH_FLATTENING - 2.0) * sin_lat * sin_lat).sqrt();

        let s = (1.0 - EARTH_FLATTENING).powi(2) * c;
        let achcp = (EARTH_EQUATORIAL_RADIUS_KM * c + self.altitude_km) * cos_lat;

        let position_km = Vector3::new(
            achcp * theta.cos(),
            achcp * theta.sin(),
            (EARTH_EQUATORIAL_RADIUS_KM * s + self.altitude_km) * sin_lat,
        );

        let velocity_km_s = Vector3::new(
            -EARTH_ANGULAR_VEL_RAD_S * position_km[1],
            EARTH_ANGULAR_VEL_RAD_S * position_km[0],
            0.0,
        );

        EciState::new(t, position_km, velocity_km_s)
    }
}
