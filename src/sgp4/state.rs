use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::JulianDate;

/// Earth Centered Inertial (TEME) state vector, valid at `t`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EciState {
    /// [JulianDate] of this state
    pub t: JulianDate,
    /// Position (km)
    pub position_km: Vector3<f64>,
    /// Velocity (km/s)
    pub velocity_km_s: Vector3<f64>,
}

impl EciState {
    /// Builds new [EciState] from position (km) and velocity (km/s).
    pub fn new(t: JulianDate, position_km: Vector3<f64>, velocity_km_s: Vector3<f64>) -> Self {
        Self {
            t,
            position_km,
            velocity_km_s,
        }
    }

    /// Geocentric radius (km)
    pub fn radius_km(&self) -> f64 {
        self.position_km.norm()
    }

    /// Velocity magnitude (km/s)
    pub fn speed_km_s(&self) -> f64 {
        self.velocity_km_s.norm()
    }

    /// True when all components are finite.
    pub(crate) fn is_finite(&self) -> bool {
        self.position_km.iter().all(|v| v.is_finite())
            && self.velocity_km_s.iter().all(|v| v.is_finite())
    }
}
