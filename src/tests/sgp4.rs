use rstest::*;

use crate::{
    prelude::{ChecksumPolicy, JulianDate, PropagationError, Satellite, Tle},
    tests::{
        init_logger, DECAYING_LINE1, DECAYING_LINE2, ISS_LINE1, ISS_LINE2, ISS_NAME,
        PARABOLIC_LINE2, STR3_SDP4_LINE1, STR3_SDP4_LINE2, STR3_SDP4_NAME, STR3_SGP4_LINE1,
        STR3_SGP4_LINE2, STR3_SGP4_NAME,
    },
};

/// Maximal position error to Spacetrack Report #3 vectors (km)
const MAX_POSITION_ERROR_KM: f64 = 1.0;

/// Maximal velocity error to Spacetrack Report #3 vectors (km/s)
const MAX_VELOCITY_ERROR_KM_S: f64 = 1.0E-3;

#[fixture]
fn str3_satellite() -> Satellite {
    let tle = Tle::parse(STR3_SGP4_NAME, STR3_SGP4_LINE1, STR3_SGP4_LINE2).unwrap();
    Satellite::from_tle(&tle).unwrap()
}

#[rstest]
#[case(
    0.0,
    [2328.97048951, -5995.22076416, 1719.97067261],
    [2.91207230, -0.98341546, -7.09081703]
)]
#[case(
    360.0,
    [2456.10705566, -6071.93853760, 1222.89727783],
    [2.67938992, -0.44829041, -7.22879231]
)]
#[case(
    720.0,
    [2567.56195068, -6112.50384522, 713.96397400],
    [2.44024599, 0.09810869, -7.31995916]
)]
#[case(
    1080.0,
    [2663.09078980, -6115.48229980, 196.39640427],
    [2.19611958, 0.65241995, -7.36282432]
)]
#[case(
    1440.0,
    [2742.55133057, -6079.67144775, -326.38095856],
    [1.94850229, 1.21106251, -7.35619372]
)]
fn spacetrack_report3(
    str3_satellite: Satellite,
    #[case] tsince_min: f64,
    #[case] position_km: [f64; 3],
    #[case] velocity_km_s: [f64; 3],
) {
    init_logger();

    let state = str3_satellite.state_after_minutes(tsince_min).unwrap();

    for i in 0..3 {
        let err = (state.position_km[i] - position_km[i]).abs();
        assert!(
            err < MAX_POSITION_ERROR_KM,
            "t+{}min: position[{}] error {}km",
            tsince_min,
            i,
            err
        );

        let err = (state.velocity_km_s[i] - velocity_km_s[i]).abs();
        assert!(
            err < MAX_VELOCITY_ERROR_KM_S,
            "t+{}min: velocity[{}] error {}km/s",
            tsince_min,
            i,
            err
        );
    }
}

#[test]
fn epoch_referenced_propagation() {
    let tle = Tle::parse(STR3_SGP4_NAME, STR3_SGP4_LINE1, STR3_SGP4_LINE2).unwrap();
    let sat = Satellite::from_tle(&tle).unwrap();

    let t = tle.epoch().add_seconds(360.0 * 60.0);

    let by_date = sat.state_at(t).unwrap();
    let by_minutes = sat.state_after_minutes(360.0).unwrap();

    assert!((by_date.position_km - by_minutes.position_km).norm() < 1.0E-3);
    assert!((by_date.t.days() - by_minutes.t.days()).abs() < 1.0E-9);

    // backwards propagation
    let before = sat.state_after_minutes(-90.0).unwrap();
    assert!(before.t < sat.epoch());
}

#[test]
fn orbit_description() {
    let tle = Tle::parse(ISS_NAME, ISS_LINE1, ISS_LINE2).unwrap();
    let sat = Satellite::from_tle(&tle).unwrap();

    assert_eq!(sat.name(), ISS_NAME);
    assert_eq!(sat.epoch(), tle.epoch());

    let period = sat.period_minutes();
    assert!((period - 92.91).abs() < 0.01, "period={}", period);

    let perigee = sat.perigee_altitude_km();
    let apogee = sat.apogee_altitude_km();
    assert!(perigee < apogee);
    assert!(perigee > 400.0 && apogee < 440.0);

    let a = sat.semi_major_axis_km();
    assert!((a - (6378.135 + (perigee + apogee) / 2.0)).abs() < 1.0E-6);

    let state = sat.state_after_minutes(0.0).unwrap();
    assert!((state.speed_km_s() - 7.67).abs() < 0.01);
    assert!(state.radius_km() > 6378.135 + 400.0);
}

#[test]
fn deep_space_rejection() {
    let tle = Tle::parse(STR3_SDP4_NAME, STR3_SDP4_LINE1, STR3_SDP4_LINE2).unwrap();

    match Satellite::from_tle(&tle) {
        Err(PropagationError::DeepSpace(period)) => {
            assert!(period > 225.0, "period={}", period);
        },
        other => panic!("expecting deep space error, got {:?}", other),
    }
}

#[test]
fn invalid_elements() {
    let tle =
        Tle::parse_with_policy(ISS_NAME, ISS_LINE1, PARABOLIC_LINE2, ChecksumPolicy::Strict)
            .unwrap();

    assert_eq!(
        Satellite::from_tle(&tle),
        Err(PropagationError::Eccentricity(1.0))
    );

    let line2 = ISS_LINE2.replace("15.50066990", "00.00000000");
    let tle =
        Tle::parse_with_policy(ISS_NAME, ISS_LINE1, &line2, ChecksumPolicy::Ignore).unwrap();

    assert_eq!(
        Satellite::from_tle(&tle),
        Err(PropagationError::MeanMotion(0.0))
    );

    let line2 = ISS_LINE2.replace("15.50066990", "-5.50066990");
    let tle =
        Tle::parse_with_policy(ISS_NAME, ISS_LINE1, &line2, ChecksumPolicy::Ignore).unwrap();

    assert!(matches!(
        Satellite::from_tle(&tle),
        Err(PropagationError::MeanMotion(_))
    ));
}

#[test]
fn orbital_decay() {
    init_logger();

    let tle = Tle::parse(ISS_NAME, DECAYING_LINE1, DECAYING_LINE2).unwrap();
    let sat = Satellite::from_tle(&tle).unwrap();

    // still in orbit a day later
    assert!(sat.state_after_minutes(1440.0).is_ok());

    let one_month = tle.epoch().add_seconds(30.0 * 86400.0);

    match sat.state_at(one_month) {
        Err(PropagationError::Decayed)
        | Err(PropagationError::PerturbedEccentricity(_))
        | Err(PropagationError::SemiLatusRectum) => {},
        other => panic!("expecting decayed orbit, got {:?}", other),
    }
}

#[test]
fn non_finite_target() {
    let tle = Tle::parse(ISS_NAME, ISS_LINE1, ISS_LINE2).unwrap();
    let sat = Satellite::from_tle(&tle).unwrap();

    assert_eq!(
        sat.state_after_minutes(f64::NAN),
        Err(PropagationError::Diverged)
    );

    assert_eq!(
        sat.state_at(JulianDate::new(f64::INFINITY)),
        Err(PropagationError::Diverged)
    );
}
