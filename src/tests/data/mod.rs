mod tle;

pub use tle::*;
