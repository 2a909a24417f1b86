use log::info;
use rstest::*;

use rand::{prelude::*, rngs::SmallRng, SeedableRng};

use crate::{
    prelude::{ChecksumPolicy, Config, JulianDate, PositionReport, Tracker},
    tests::{init_logger, ISS_LINE1, ISS_LINE2, ISS_NAME, STR3_SGP4_LINE1, STR3_SGP4_LINE2},
};

/// Characters injected in the element lines
const ALPHABET: &[u8] = b"0123456789 .+-ABXYZ";

/// Replaces a few random columns of this line.
fn corrupt(rng: &mut SmallRng, line: &str, max_corruptions: usize) -> String {
    let mut bytes = line.as_bytes().to_vec();
    let num = rng.random_range(1..=max_corruptions);

    for _ in 0..num {
        let offset = rng.random_range(0..bytes.len());
        let symbol = ALPHABET[rng.random_range(0..ALPHABET.len())];
        bytes[offset] = symbol;
    }

    String::from_utf8_lossy(&bytes).to_string()
}

/// Any report that does make it through must be consistent.
fn verify_report(report: &PositionReport) {
    assert!(report.age_seconds.is_finite());
    assert!(report.latitude_deg.is_finite() && report.latitude_deg.abs() <= 90.0);
    assert!(report.longitude_deg.is_finite());
    assert!(report.longitude_deg > -180.0 && report.longitude_deg <= 180.0);
    assert!(report.altitude_km.is_finite());

    if let Some(look) = report.look_angle {
        assert!((0.0..360.0).contains(&look.azimuth_deg));
        assert!((-90.0..=90.0).contains(&look.elevation_deg));
        assert!(look.range_km.is_finite() && look.range_km >= 0.0);
        assert!(look.range_rate_km_s.is_finite());
    }
}

#[rstest]
#[case(0, ChecksumPolicy::Strict, ISS_LINE1, ISS_LINE2)]
#[case(1, ChecksumPolicy::Ignore, ISS_LINE1, ISS_LINE2)]
#[case(2, ChecksumPolicy::Advisory, STR3_SGP4_LINE1, STR3_SGP4_LINE2)]
#[case(3, ChecksumPolicy::Ignore, STR3_SGP4_LINE1, STR3_SGP4_LINE2)]
fn corrupted_element_sets(
    #[case] seed: u64,
    #[case] policy: ChecksumPolicy,
    #[case] line1: &str,
    #[case] line2: &str,
) {
    init_logger();

    let mut rng = SmallRng::seed_from_u64(seed);

    let tracker = Tracker::new(Config::default().with_checksum_policy(policy));
    let t0 = JulianDate::from_gregorian(2022, 11, 18, 0, 0, 0, 0);

    let (mut passed, mut failed) = (0, 0);

    for _ in 0..500 {
        let (line1, line2) = match rng.random_range(0..3) {
            0 => (corrupt(&mut rng, line1, 3), line2.to_string()),
            1 => (line1.to_string(), corrupt(&mut rng, line2, 3)),
            _ => (corrupt(&mut rng, line1, 2), corrupt(&mut rng, line2, 2)),
        };

        let t = t0.add_seconds(rng.random_range(-86400.0..86400.0));

        let lat = rng.random_range(-90.0..=90.0);
        let lon = rng.random_range(-180.0..180.0);
        let alt = rng.random_range(0.0..5.0);

        match tracker.position_and_look_angle_at(ISS_NAME, &line1, &line2, lat, lon, alt, t) {
            Ok(report) => {
                verify_report(&report);
                passed += 1;
            },
            Err(_) => failed += 1,
        }
    }

    info!(
        "{:?} fuzzing: {} valid reports, {} rejected sets",
        policy, passed, failed
    );

    // without checksum rejection, corrupting the designator or
    // the least significant digits still yields a valid set
    if policy != ChecksumPolicy::Strict {
        assert!(passed > 0, "no corrupted set made it through");
    }
}

#[test]
fn truncated_and_padded_lines() {
    init_logger();

    let tracker = Tracker::default();
    let t = JulianDate::from_gregorian(2022, 11, 18, 0, 0, 0, 0);

    for len in 0..ISS_LINE1.len() {
        assert!(tracker
            .position_at(ISS_NAME, &ISS_LINE1[..len], ISS_LINE2, t)
            .is_err());
        assert!(tracker
            .position_at(ISS_NAME, ISS_LINE1, &ISS_LINE2[..len], t)
            .is_err());
    }

    let padded = format!("X{}", ISS_LINE1);
    assert!(tracker.position_at(ISS_NAME, &padded, ISS_LINE2, t).is_err());
}
