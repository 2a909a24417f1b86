//! Reference element sets

/// ISS (ZARYA), epoch 2022 day 321.90676521
pub const ISS_NAME: &str = "ISS (ZARYA)";

pub const ISS_LINE1: &str =
    "1 25544U 98067A   22321.90676521  .00009613  00000+0  17572-3 0  9999";

pub const ISS_LINE2: &str =
    "2 25544  51.6438 295.0836 0006994  86.3588   5.1970 15.50066990369021";

/// ISS epoch, as a Julian Date
pub const ISS_EPOCH_JD: f64 = 2459901.40676521;

/// Seconds between Jan 1 2001 00:00 UTC and the ISS epoch
pub const ISS_AGE_SECONDS: f64 = 690414344.514142;

/// Spacetrack Report #3 near-Earth test case (SGP4)
pub const STR3_SGP4_NAME: &str = "STR#3 SGP4 TEST";

pub const STR3_SGP4_LINE1: &str =
    "1 88888U          80275.98708465  .00073094  13844-3  66816-4 0    87";

pub const STR3_SGP4_LINE2: &str =
    "2 88888  72.8435 115.9689 0086731  52.6988 110.5714 16.05824518  1058";

/// Spacetrack Report #3 deep space test case (SDP4)
pub const STR3_SDP4_NAME: &str = "STR#3 SDP4 TEST";

pub const STR3_SDP4_LINE1: &str =
    "1 11801U          80230.29629788  .01431103  00000-0  14311-1 0    80";

pub const STR3_SDP4_LINE2: &str =
    "2 11801  46.7916 230.4354 7318036  47.4722  10.4117  2.28537848    68";

/// ISS elements on a lower orbit, with a large drag term: re-enters within a month.
pub const DECAYING_LINE1: &str =
    "1 25544U 98067A   22321.90676521  .00009613  00000+0  10000-2 0  9997";

pub const DECAYING_LINE2: &str =
    "2 25544  51.6438 295.0836 0006994  86.3588   5.1970 16.20000000369029";

/// ISS line 2 with a parabolic eccentricity (explicit decimal point)
pub const PARABOLIC_LINE2: &str =
    "2 25544  51.6438 295.0836 1.00000  86.3588   5.1970 15.50066990369024";
