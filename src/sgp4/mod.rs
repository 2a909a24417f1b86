//! SGP4 near-Earth propagation.
//!
//! Analytical model of Hoots & Roehrich (Spacetrack Report #3, 1980),
//! accounting for J2, J3, J4 zonal harmonics and atmospheric drag
//! through the B* term. Deep space element sets (period >= 225 min)
//! require the SDP4 extension and are rejected.
use std::f64::consts::TAU;

use log::{debug, trace};
use nalgebra::Vector3;

use crate::{
    constants::{
        CK2, CK4, DEEP_SPACE_PERIOD_MINUTES, EARTH_EQUATORIAL_RADIUS_KM, MINUTES_PER_DAY,
        QOMS2T, S_DENSITY, XJ3, XKE,
    },
    error::PropagationError,
    time::JulianDate,
    tle::Tle,
};

mod state;
pub use state::EciState;

const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Kepler's equation iteration cap
const KEPLER_MAX_ITERATIONS: usize = 10;

/// Kepler's equation convergence criteria (radians)
const KEPLER_TOLERANCE: f64 = 1.0E-6;

/// Eccentricity below which the c3 and mean anomaly drag terms are dropped
const SMALL_ECCENTRICITY: f64 = 1.0E-4;

/// Mean elements, in SGP4 units (radians, radians per minute).
#[derive(Debug, Clone, Copy, PartialEq)]
struct MeanElements {
    inclination: f64,
    raan: f64,
    eccentricity: f64,
    arg_perigee: f64,
    mean_anomaly: f64,
    bstar: f64,
}

/// Constants derived from the mean elements, once and for all.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Coefficients {
    /// Truncated drag model (perigee below 220 km)
    simple: bool,
    cosio: f64,
    sinio: f64,
    x3thm1: f64,
    x1mth2: f64,
    x7thm1: f64,
    /// Recovered (Brouwer) mean motion (rad/min)
    xnodp: f64,
    /// Recovered semi major axis (Earth radii)
    aodp: f64,
    eta: f64,
    c1: f64,
    c4: f64,
    c5: f64,
    xmdot: f64,
    omgdot: f64,
    xnodot: f64,
    omgcof: f64,
    xmcof: f64,
    xnodcf: f64,
    t2cof: f64,
    xlcof: f64,
    aycof: f64,
    delmo: f64,
    sinmo: f64,
    d2: f64,
    d3: f64,
    d4: f64,
    t3cof: f64,
    t4cof: f64,
    t5cof: f64,
}

/// [Satellite] is derived from a [Tle] and maps any instant
/// to an [EciState]. It only holds constants: every propagation
/// is independent, so [Satellite] may be shared between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    name: String,
    epoch: JulianDate,
    elements: MeanElements,
    coefs: Coefficients,
}

impl Satellite {
    /// Builds [Satellite] from this [Tle], verifying that its elements
    /// are physically valid and fit the near-Earth model.
    pub fn from_tle(tle: &Tle) -> Result<Self, PropagationError> {
        let eo = tle.eccentricity();
        let n_rev_day = tle.mean_motion_rev_per_day();

        let angles = [
            tle.inclination_deg(),
            tle.raan_deg(),
            tle.arg_perigee_deg(),
            tle.mean_anomaly_deg(),
            tle.bstar(),
        ];

        if angles.iter().any(|angle| !angle.is_finite()) {
            return Err(PropagationError::NonFiniteElement);
        }

        if !eo.is_finite() || !(0.0..1.0).contains(&eo) {
            return Err(PropagationError::Eccentricity(eo));
        }

        if !n_rev_day.is_finite() || n_rev_day <= 0.0 {
            return Err(PropagationError::MeanMotion(n_rev_day));
        }

        let elements = MeanElements {
            inclination: tle.inclination_deg().to_radians(),
            raan: tle.raan_deg().to_radians(),
            eccentricity: eo,
            arg_perigee: tle.arg_perigee_deg().to_radians(),
            mean_anomaly: tle.mean_anomaly_deg().to_radians(),
            bstar: tle.bstar(),
        };

        // rad/min
        let xno = n_rev_day * TAU / MINUTES_PER_DAY;

        let coefs = Self::coefficients(&elements, xno)?;

        let s = Self {
            name: tle.name().to_string(),
            epoch: tle.epoch(),
            elements,
            coefs,
        };

        debug!(
            "{}: sgp4 - period={:.3}min, a={:.3}km, perigee={:.3}km, simple={}",
            s.name,
            s.period_minutes(),
            s.semi_major_axis_km(),
            s.perigee_altitude_km(),
            s.coefs.simple,
        );

        Ok(s)
    }

    fn coefficients(el: &MeanElements, xno: f64) -> Result<Coefficients, PropagationError> {
        let eo = el.eccentricity;
        let bstar = el.bstar;

        let mut c = Coefficients::default();

        // Recover original mean motion (xnodp) and semi major axis (aodp)
        let a1 = (XKE / xno).powf(TWO_THIRDS);
        c.cosio = el.inclination.cos();
        c.sinio = el.inclination.sin();

        let theta2 = c.cosio * c.cosio;
        c.x3thm1 = 3.0 * theta2 - 1.0;

        let eosq = eo * eo;
        let betao2 = 1.0 - eosq;
        let betao = betao2.sqrt();

        let del1 = 1.5 * CK2 * c.x3thm1 / (a1 * a1 * betao * betao2);
        let ao = a1 * (1.0 - del1 * (0.5 * TWO_THIRDS + del1 * (1.0 + 134.0 / 81.0 * del1)));
        let delo = 1.5 * CK2 * c.x3thm1 / (ao * ao * betao * betao2);

        c.xnodp = xno / (1.0 + delo);
        c.aodp = ao / (1.0 - delo);

        let period_minutes = TAU / c.xnodp;
        if period_minutes >= DEEP_SPACE_PERIOD_MINUTES {
            return Err(PropagationError::DeepSpace(period_minutes));
        }

        // Perigee below 220 km: equations are truncated to a linear
        // variation in sqrt(a) and quadratic variation in mean anomaly.
        c.simple = c.aodp * (1.0 - eo) < (220.0 / EARTH_EQUATORIAL_RADIUS_KM + 1.0);

        // Perigee below 156 km: s and qoms2t are altered
        let mut s4 = S_DENSITY;
        let mut qoms24 = QOMS2T;

        let perigee_km = (c.aodp * (1.0 - eo) - 1.0) * EARTH_EQUATORIAL_RADIUS_KM;

        if perigee_km < 156.0 {
            s4 = if perigee_km <= 98.0 {
                20.0
            } else {
                perigee_km - 78.0
            };
            qoms24 = ((120.0 - s4) / EARTH_EQUATORIAL_RADIUS_KM).powi(4);
            s4 = s4 / EARTH_EQUATORIAL_RADIUS_KM + 1.0;
        }

        let pinvsq = 1.0 / (c.aodp * c.aodp * betao2 * betao2);
        let tsi = 1.0 / (c.aodp - s4);

        c.eta = c.aodp * eo * tsi;
        let etasq = c.eta * c.eta;
        let eeta = eo * c.eta;
        let psisq = (1.0 - etasq).abs();

        let coef = qoms24 * tsi.powi(4);
        let coef1 = coef / psisq.powf(3.5);

        let c2 = coef1
            * c.xnodp
            * (c.aodp * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.75 * CK2 * tsi / psisq * c.x3thm1 * (8.0 + 3.0 * etasq * (8.0 + etasq)));

        c.c1 = bstar * c2;

        let a3ovk2 = -XJ3 / CK2;

        let c3 = if eo > SMALL_ECCENTRICITY {
            coef * tsi * a3ovk2 * c.xnodp * c.sinio / eo
        } else {
            0.0
        };

        c.x1mth2 = 1.0 - theta2;

        c.c4 = 2.0
            * c.xnodp
            * coef1
            * c.aodp
            * betao2
            * (c.eta * (2.0 + 0.5 * etasq) + eo * (0.5 + 2.0 * etasq)
                - 2.0 * CK2 * tsi / (c.aodp * psisq)
                    * (-3.0 * c.x3thm1 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75
                            * c.x1mth2
                            * (2.0 * etasq - eeta * (1.0 + etasq))
                            * (2.0 * el.arg_perigee).cos()));

        c.c5 = 2.0 * coef1 * c.aodp * betao2 * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);

        // secular rates
        let theta4 = theta2 * theta2;
        let temp1 = 3.0 * CK2 * pinvsq * c.xnodp;
        let temp2 = temp1 * CK2 * pinvsq;
        let temp3 = 1.25 * CK4 * pinvsq * pinvsq * c.xnodp;

        c.xmdot = c.xnodp
            + 0.5 * temp1 * betao * c.x3thm1
            + 0.0625 * temp2 * betao * (13.0 - 78.0 * theta2 + 137.0 * theta4);

        let x1m5th = 1.0 - 5.0 * theta2;

        c.omgdot = -0.5 * temp1 * x1m5th
            + 0.0625 * temp2 * (7.0 - 114.0 * theta2 + 395.0 * theta4)
            + temp3 * (3.0 - 36.0 * theta2 + 49.0 * theta4);

        let xhdot1 = -temp1 * c.cosio;

        c.xnodot = xhdot1
            + (0.5 * temp2 * (4.0 - 19.0 * theta2) + 2.0 * temp3 * (3.0 - 7.0 * theta2)) * c.cosio;

        c.omgcof = bstar * c3 * el.arg_perigee.cos();

        c.xmcof = if eo > SMALL_ECCENTRICITY {
            -TWO_THIRDS * coef * bstar / eeta
        } else {
            0.0
        };

        c.xnodcf = 3.5 * betao2 * xhdot1 * c.c1;
        c.t2cof = 1.5 * c.c1;

        // avoids a division by zero for 180° inclinations
        let one_plus_cosio = if (1.0 + c.cosio).abs() > 1.5E-12 {
            1.0 + c.cosio
        } else {
            1.5E-12
        };

        c.xlcof = 0.125 * a3ovk2 * c.sinio * (3.0 + 5.0 * c.cosio) / one_plus_cosio;
        c.aycof = 0.25 * a3ovk2 * c.sinio;
        c.delmo = (1.0 + c.eta * el.mean_anomaly.cos()).powi(3);
        c.sinmo = el.mean_anomaly.sin();
        c.x7thm1 = 7.0 * theta2 - 1.0;

        if !c.simple {
            let c1sq = c.c1 * c.c1;
            c.d2 = 4.0 * c.aodp * tsi * c1sq;
            let temp = c.d2 * tsi * c.c1 / 3.0;
            c.d3 = (17.0 * c.aodp + s4) * temp;
            c.d4 = 0.5 * temp * c.aodp * tsi * (221.0 * c.aodp + 31.0 * s4) * c.c1;
            c.t3cof = c.d2 + 2.0 * c1sq;
            c.t4cof = 0.25 * (3.0 * c.d3 + c.c1 * (12.0 * c.d2 + 10.0 * c1sq));
            c.t5cof = 0.2
                * (3.0 * c.d4
                    + 12.0 * c.c1 * c.d3
                    + 6.0 * c.d2 * c.d2
                    + 15.0 * c1sq * (2.0 * c.d2 + c1sq));
        }

        Ok(c)
    }

    /// Satellite name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Epoch of the underlying element set
    pub fn epoch(&self) -> JulianDate {
        self.epoch
    }

    /// Anomalistic period (minutes)
    pub fn period_minutes(&self) -> f64 {
        TAU / self.coefs.xnodp
    }

    /// Mean semi major axis (km)
    pub fn semi_major_axis_km(&self) -> f64 {
        self.coefs.aodp * EARTH_EQUATORIAL_RADIUS_KM
    }

    /// Mean perigee altitude above the equatorial radius (km)
    pub fn perigee_altitude_km(&self) -> f64 {
        (self.coefs.aodp * (1.0 - self.elements.eccentricity) - 1.0) * EARTH_EQUATORIAL_RADIUS_KM
    }

    /// Mean apogee altitude above the equatorial radius (km)
    pub fn apogee_altitude_km(&self) -> f64 {
        (self.coefs.aodp * (1.0 + self.elements.eccentricity) - 1.0) * EARTH_EQUATORIAL_RADIUS_KM
    }

    /// Propagates to `t`, returning the [EciState] at `t`.
    pub fn state_at(&self, t: JulianDate) -> Result<EciState, PropagationError> {
        let tsince = t.elapsed_minutes(&self.epoch);
        self.propagate(t, tsince)
    }

    /// Propagates by `tsince` minutes from the element set epoch.
    pub fn state_after_minutes(&self, tsince: f64) -> Result<EciState, PropagationError> {
        let t = self.epoch.add_seconds(tsince * 60.0);
        self.propagate(t, tsince)
    }

    fn propagate(&self, t: JulianDate, tsince: f64) -> Result<EciState, PropagationError> {
        let el = &self.elements;
        let c = &self.coefs;

        if !tsince.is_finite() {
            return Err(PropagationError::Diverged);
        }

        // secular gravity and atmospheric drag
        let xmdf = el.mean_anomaly + c.xmdot * tsince;
        let omgadf = el.arg_perigee + c.omgdot * tsince;
        let xnoddf = el.raan + c.xnodot * tsince;

        let mut omega = omgadf;
        let mut xmp = xmdf;

        let tsq = tsince * tsince;
        let xnode = xnoddf + c.xnodcf * tsq;

        let mut tempa = 1.0 - c.c1 * tsince;
        let mut tempe = el.bstar * c.c4 * tsince;
        let mut templ = c.t2cof * tsq;

        if !c.simple {
            let delomg = c.omgcof * tsince;
            let delm = c.xmcof * ((1.0 + c.eta * xmdf.cos()).powi(3) - c.delmo);
            let temp = delomg + delm;

            xmp = xmdf + temp;
            omega = omgadf - temp;

            let tcube = tsq * tsince;
            let tfour = tsince * tcube;

            tempa = tempa - c.d2 * tsq - c.d3 * tcube - c.d4 * tfour;
            tempe += el.bstar * c.c5 * (xmp.sin() - c.sinmo);
            templ += c.t3cof * tcube + tfour * (c.t4cof + tsince * c.t5cof);
        }

        let a = c.aodp * tempa.powi(2);
        let mut e = el.eccentricity - tempe;

        if !(-0.001..1.0).contains(&e) || !a.is_finite() {
            return Err(PropagationError::PerturbedEccentricity(e));
        }

        e = e.max(1.0E-6);

        let xl = xmp + omega + xnode + c.xnodp * templ;
        let beta = (1.0 - e * e).sqrt();
        let xn = XKE / a.powf(1.5);

        // long period periodics
        let axn = e * omega.cos();
        let temp = 1.0 / (a * beta * beta);
        let xll = temp * c.xlcof * axn;
        let aynl = temp * c.aycof;
        let xlt = xl + xll;
        let ayn = e * omega.sin() + aynl;

        // Kepler's equation
        let capu = (xlt - xnode).rem_euclid(TAU);
        let mut epw = capu;

        let (mut sinepw, mut cosepw) = epw.sin_cos();

        for _ in 0..KEPLER_MAX_ITERATIONS {
            (sinepw, cosepw) = epw.sin_cos();

            let f = capu - ayn * cosepw + axn * sinepw - epw;
            let fdot = 1.0 - axn * cosepw - ayn * sinepw;

            // first newton steps may overshoot for high eccentricities
            let step = (f / fdot).clamp(-0.95, 0.95);
            epw += step;

            if step.abs() <= KEPLER_TOLERANCE {
                break;
            }
        }

        // short period preliminary quantities
        let ecose = axn * cosepw + ayn * sinepw;
        let esine = axn * sinepw - ayn * cosepw;
        let elsq = axn * axn + ayn * ayn;
        let temp = 1.0 - elsq;
        let pl = a * temp;

        if pl < 0.0 {
            return Err(PropagationError::SemiLatusRectum);
        }

        let r = a * (1.0 - ecose);
        let temp1 = 1.0 / r;
        let rdot = XKE * a.sqrt() * esine * temp1;
        let rfdot = XKE * pl.sqrt() * temp1;
        let temp2 = a * temp1;
        let betal = temp.sqrt();
        let temp3 = 1.0 / (1.0 + betal);

        let cosu = temp2 * (cosepw - axn + ayn * esine * temp3);
        let sinu = temp2 * (sinepw - ayn - axn * esine * temp3);
        let u = sinu.atan2(cosu);

        let sin2u = 2.0 * sinu * cosu;
        let cos2u = 2.0 * cosu * cosu - 1.0;

        let temp = 1.0 / pl;
        let temp1 = CK2 * temp;
        let temp2 = temp1 * temp;

        // short period periodics
        let rk = r * (1.0 - 1.5 * temp2 * betal * c.x3thm1) + 0.5 * temp1 * c.x1mth2 * cos2u;
        let uk = u - 0.25 * temp2 * c.x7thm1 * sin2u;
        let xnodek = xnode + 1.5 * temp2 * c.cosio * sin2u;
        let xinck = el.inclination + 1.5 * temp2 * c.cosio * c.sinio * cos2u;
        let rdotk = rdot - xn * temp1 * c.x1mth2 * sin2u;
        let rfdotk = rfdot + xn * temp1 * (c.x1mth2 * cos2u + 1.5 * c.x3thm1);

        if rk < 1.0 {
            return Err(PropagationError::Decayed);
        }

        // orientation vectors
        let (sinuk, cosuk) = uk.sin_cos();
        let (sinik, cosik) = xinck.sin_cos();
        let (sinnok, cosnok) = xnodek.sin_cos();

        let xmx = -sinnok * cosik;
        let xmy = cosnok * cosik;

        let u_vec = Vector3::new(
            xmx * sinuk + cosnok * cosuk,
            xmy * sinuk + sinnok * cosuk,
            sinik * sinuk,
        );

        let v_vec = Vector3::new(
            xmx * cosuk - cosnok * sinuk,
            xmy * cosuk - sinnok * sinuk,
            sinik * cosuk,
        );

        // Earth radii, Earth radii per minute => km, km/s
        let position_km = u_vec * rk * EARTH_EQUATORIAL_RADIUS_KM;
        let velocity_km_s = (u_vec * rdotk + v_vec * rfdotk) * EARTH_EQUATORIAL_RADIUS_KM / 60.0;

        let state = EciState::new(t, position_km, velocity_km_s);

        if !state.is_finite() {
            return Err(PropagationError::Diverged);
        }

        trace!(
            "{}: sgp4 - tsince={:.6}min pos={:?}km",
            self.name,
            tsince,
            state.position_km.as_slice(),
        );

        Ok(state)
    }
}
