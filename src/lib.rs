#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod cfg;
mod constants;
mod error;
mod frame;
mod sgp4;
mod site;
mod time;
mod tle;
mod tracker;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{ChecksumPolicy, Config, Error as ConfigError, GeodeticOpts};
    pub use crate::constants::{
        DEEP_SPACE_PERIOD_MINUTES, EARTH_ANGULAR_VEL_RAD_S, EARTH_EQUATORIAL_RADIUS_KM,
        EARTH_FLATTENING, EARTH_ROTATION_SIDEREAL_PER_SOLAR, MINUTES_PER_DAY, SECONDS_PER_DAY,
    };
    pub use crate::error::{ConversionError, Error, ParsingError, PropagationError};
    pub use crate::frame::GeodeticPosition;
    pub use crate::sgp4::{EciState, Satellite};
    pub use crate::site::{GroundSite, LookAngle};
    pub use crate::time::{full_year, JulianDate, REFERENCE_EPOCH_JAN1_2001};
    pub use crate::tle::{parse_catalog, Field, Tle};
    pub use crate::tracker::{
        compute_position, compute_position_and_look_angle, signed_longitude, PositionReport,
        Tracker,
    };
    // re-export
    pub use hifitime::Epoch;
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
pub use tracker::{compute_position, compute_position_and_look_angle};
