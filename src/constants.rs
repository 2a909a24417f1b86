//! Physical and model constants.
//! SGP4 was fitted against WGS-72, so the Earth model is WGS-72 throughout:
//! mixing ellipsoids between propagation and frame conversion biases the altitude.

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Minutes per day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Earth equatorial radius (kilometers, WGS-72)
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.135;

/// Earth flattening (WGS-72)
pub const EARTH_FLATTENING: f64 = 1.0 / 298.26;

/// Earth rotation, in sidereal days per solar day
pub const EARTH_ROTATION_SIDEREAL_PER_SOLAR: f64 = 1.00273790934;

/// Earth angular velocity (rad/s), derived from [EARTH_ROTATION_SIDEREAL_PER_SOLAR]
pub const EARTH_ANGULAR_VEL_RAD_S: f64 =
    2.0 * std::f64::consts::PI * EARTH_ROTATION_SIDEREAL_PER_SOLAR / SECONDS_PER_DAY;

/// sqrt(GM) in (Earth radii)^1.5 per minute
pub(crate) const XKE: f64 = 7.43669161E-2;

/// J2/2 in Earth radii units
pub(crate) const CK2: f64 = 5.413079E-4;

/// -3/8 J4 in Earth radii units
pub(crate) const CK4: f64 = 6.209887E-7;

/// J3 harmonic
pub(crate) const XJ3: f64 = -2.53881E-6;

/// Atmospheric density parameter s (Earth radii)
pub(crate) const S_DENSITY: f64 = 1.012229;

/// (q0 - s)^4 (Earth radii^4)
pub(crate) const QOMS2T: f64 = 1.880279E-09;

/// Orbital period above which an element set belongs to deep space (minutes)
pub const DEEP_SPACE_PERIOD_MINUTES: f64 = 225.0;
