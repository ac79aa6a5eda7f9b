//! Special-relativity kinematics over arbitrary-precision values.
//!
//! Closed-form formulas for constant proper acceleration, rapidity, Lorentz
//! factors, relativistic energy and momentum, and spacetime intervals. Every
//! function takes the [`RelativityContext`] explicitly; hardware floats are
//! insufficient here because the interesting inputs sit within a hair of the
//! speed of light.
//!
//! A velocity at or above c is an error, not a NaN sentinel: the value would
//! otherwise flow into a display layer and imply faster-than-light travel.

use astro_float::{BigFloat, expr};
use rel_core::{RelativityContext, ROUNDING, is_non_finite};
use thiserror::Error;

/// Errors raised by the formula layer.
#[derive(Debug, Error)]
pub enum KinematicsError {
    /// The magnitude of a velocity reached or exceeded the speed of light.
    #[error("velocity {0} m/s is at or above the speed of light")]
    FasterThanLight(String),
    /// A formula dividing by the acceleration received zero.
    #[error("acceleration must be non-zero")]
    ZeroAcceleration,
    /// A result that should be sub-light or real came out otherwise; the
    /// configured digit budget was too small for the inputs.
    #[error("precision failure: {0}")]
    PrecisionFailure(&'static str),
    /// A NaN or infinity was passed in.
    #[error("input is not finite")]
    NonFinite,
}

/// Result of a flip-and-burn maneuver: accelerate to the midpoint, flip,
/// decelerate to rest at the destination.
#[derive(Debug, Clone)]
pub struct FlipAndBurn {
    pub proper_time_s: BigFloat,
    pub peak_velocity_m_s: BigFloat,
    pub peak_lorentz: BigFloat,
    pub coordinate_time_s: BigFloat,
}

/// Result of a full-duration burn over a fixed distance.
#[derive(Debug, Clone)]
pub struct Fall {
    pub proper_time_s: BigFloat,
    pub coordinate_time_s: BigFloat,
    pub impact_velocity_m_s: BigFloat,
}

/// Energy and momentum of a particle, returned together by [`four_momentum`].
#[derive(Debug, Clone)]
pub struct EnergyMomentum {
    pub energy_j: BigFloat,
    pub momentum_kg_m_s: BigFloat,
}

/// An event in 1+1 dimensional spacetime: seconds and metres.
#[derive(Debug, Clone)]
pub struct Event1D {
    pub t: BigFloat,
    pub x: BigFloat,
}

impl Event1D {
    pub fn from_f64(rel: &RelativityContext, t: f64, x: f64) -> Self {
        Self {
            t: rel.from_f64(t),
            x: rel.from_f64(x),
        }
    }
}

/// An event in 3+1 dimensional spacetime: seconds and metres.
#[derive(Debug, Clone)]
pub struct Event3D {
    pub t: BigFloat,
    pub x: BigFloat,
    pub y: BigFloat,
    pub z: BigFloat,
}

impl Event3D {
    pub fn from_f64(rel: &RelativityContext, t: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            t: rel.from_f64(t),
            x: rel.from_f64(x),
            y: rel.from_f64(y),
            z: rel.from_f64(z),
        }
    }
}

/// Causal classification of a squared spacetime interval.
#[derive(Debug, Clone)]
pub enum Separation {
    /// Events connectable by a clock; minimum proper time between them.
    TimeLike { seconds: BigFloat },
    /// Events connected by a light signal.
    LightLike,
    /// Causally disconnected events; minimum proper distance between them.
    SpaceLike { meters: BigFloat },
}

/// Direction of relative motion for the Doppler shift.
#[derive(Debug, Clone, Copy)]
pub enum DopplerDirection {
    Approaching,
    Receding,
}

/// Reject non-finite velocities and magnitudes at or above c.
pub fn check_velocity(rel: &RelativityContext, velocity: &BigFloat) -> Result<(), KinematicsError> {
    if is_non_finite(velocity) {
        return Err(KinematicsError::NonFinite);
    }
    if velocity.abs().ge(&rel.constants.c) {
        return Err(KinematicsError::FasterThanLight(velocity.to_string()));
    }
    Ok(())
}

fn check_acceleration(accel: &BigFloat) -> Result<(), KinematicsError> {
    if is_non_finite(accel) {
        return Err(KinematicsError::NonFinite);
    }
    if accel.is_zero() {
        return Err(KinematicsError::ZeroAcceleration);
    }
    Ok(())
}

/// Velocity (m/s) after proper time `tau` at constant proper acceleration.
pub fn relativistic_velocity(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    tau: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    if is_non_finite(accel) || is_non_finite(tau) {
        return Err(KinematicsError::NonFinite);
    }
    let accel = accel.abs();
    let tau = tau.abs();
    let c = &rel.constants.c;
    // c * tanh(a * tau / c)
    Ok(expr!(c * tanh(accel * tau / c), &mut rel.ctx))
}

/// Coordinate distance (m) covered in proper time `tau` at constant proper acceleration.
pub fn relativistic_distance(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    tau: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_acceleration(accel)?;
    let accel = accel.abs();
    let tau = tau.abs();
    let c = &rel.constants.c;
    let c_squared = &rel.constants.c_squared;
    let one = &rel.constants.one;
    // (c² / a) * (cosh(a * tau / c) - 1)
    Ok(expr!(
        (c_squared / accel) * (cosh(accel * tau / c) - one),
        &mut rel.ctx
    ))
}

/// Proper time (s) needed to cover a coordinate distance at constant proper acceleration.
pub fn relativistic_time_for_distance(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    dist: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_acceleration(accel)?;
    let accel = accel.abs();
    let dist = dist.abs();
    let c = &rel.constants.c;
    let c_squared = &rel.constants.c_squared;
    let one = &rel.constants.one;
    // (c / a) * acosh(dist * a / c² + 1)
    Ok(expr!(
        (c / accel) * acosh((dist * accel) / c_squared + one),
        &mut rel.ctx
    ))
}

/// Proper time (s) needed to reach `velocity` at constant proper acceleration.
pub fn tau_to_velocity(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    velocity: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_acceleration(accel)?;
    check_velocity(rel, velocity)?;
    let c = &rel.constants.c;
    // (c / a) * atanh(velocity / c)
    Ok(expr!((c / accel) * atanh(velocity / c), &mut rel.ctx))
}

/// Coordinate (lab) time elapsed for a stationary observer while the
/// traveller experiences proper time `tau`.
pub fn coordinate_time(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    tau: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_acceleration(accel)?;
    let c = &rel.constants.c;
    // (c / a) * sinh(a * tau / c)
    Ok(expr!((c / accel) * sinh(accel * tau / c), &mut rel.ctx))
}

/// Velocity (m/s) after coordinate time `t` at constant proper acceleration.
pub fn relativistic_velocity_coord(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    coord_time: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_acceleration(accel)?;
    let c = &rel.constants.c;
    let one = &rel.constants.one;
    // (a * t) / sqrt(1 + (a * t / c)²)
    Ok(expr!(
        (accel * coord_time) / sqrt(one + pow(accel * coord_time / c, 2)),
        &mut rel.ctx
    ))
}

/// Coordinate distance (m) covered in coordinate time `t` at constant proper acceleration.
pub fn relativistic_distance_coord(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    coord_time: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_acceleration(accel)?;
    let c = &rel.constants.c;
    let c_squared = &rel.constants.c_squared;
    let one = &rel.constants.one;
    // (c² / a) * (sqrt(1 + (a * t / c)²) - 1)
    Ok(expr!(
        (c_squared / accel) * (sqrt(one + pow(accel * coord_time / c, 2)) - one),
        &mut rel.ctx
    ))
}

/// Non-relativistic distance under constant acceleration, for comparison columns.
pub fn simple_distance(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    t: &BigFloat,
) -> BigFloat {
    let half = &rel.constants.half;
    // a * t² / 2
    expr!(half * accel * pow(t, 2), &mut rel.ctx)
}

/// Proper time, peak velocity, peak Lorentz factor, and coordinate time for
/// a flip-and-burn transfer across `dist` metres.
pub fn flip_and_burn(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    dist: &BigFloat,
) -> Result<FlipAndBurn, KinematicsError> {
    let accel = accel.abs();
    let dist = dist.abs();
    let half_dist = expr!(dist / 2.0, &mut rel.ctx);
    let half_proper = relativistic_time_for_distance(rel, &accel, &half_dist)?;
    let half_coord = coordinate_time(rel, &accel, &half_proper)?;
    let peak_velocity = relativistic_velocity(rel, &accel, &half_proper)?;
    let peak_lorentz = lorentz_factor(rel, &peak_velocity)?;
    Ok(FlipAndBurn {
        proper_time_s: expr!(half_proper * 2.0, &mut rel.ctx),
        peak_velocity_m_s: peak_velocity,
        peak_lorentz,
        coordinate_time_s: expr!(half_coord * 2.0, &mut rel.ctx),
    })
}

/// Time to fall `dist` metres under constant acceleration, with the velocity
/// at impact. Ignores gravity falloff with altitude and air resistance.
pub fn fall(
    rel: &mut RelativityContext,
    accel: &BigFloat,
    dist: &BigFloat,
) -> Result<Fall, KinematicsError> {
    let proper_time_s = relativistic_time_for_distance(rel, accel, dist)?;
    let coordinate_time_s = coordinate_time(rel, accel, &proper_time_s)?;
    let impact_velocity_m_s = relativistic_velocity(rel, accel, &proper_time_s)?;
    Ok(Fall {
        proper_time_s,
        coordinate_time_s,
        impact_velocity_m_s,
    })
}

/// Rapidity of a sub-light velocity. Rapidities add linearly where
/// velocities do not.
pub fn rapidity_from_velocity(
    rel: &mut RelativityContext,
    velocity: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_velocity(rel, velocity)?;
    let c = &rel.constants.c;
    Ok(expr!(atanh(velocity / c), &mut rel.ctx))
}

/// Velocity (m/s) for a rapidity.
///
/// No finite rapidity maps to a velocity at or above c, so an out-of-range
/// result can only mean the digit budget was exhausted.
pub fn velocity_from_rapidity(
    rel: &mut RelativityContext,
    rapidity: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    let c = &rel.constants.c;
    let velocity = expr!(c * tanh(rapidity), &mut rel.ctx);
    check_velocity(rel, &velocity)
        .map_err(|_| KinematicsError::PrecisionFailure("rapidity mapped to a velocity at or above c"))?;
    Ok(velocity)
}

/// Relativistic composition of two sub-light velocities.
pub fn add_velocities(
    rel: &mut RelativityContext,
    v1: &BigFloat,
    v2: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_velocity(rel, v1)?;
    check_velocity(rel, v2)?;
    let c_squared = &rel.constants.c_squared;
    let one = &rel.constants.one;
    // (v1 + v2) / (1 + v1·v2 / c²)
    Ok(expr!(
        (v1 + v2) / (one + (v1 * v2) / c_squared),
        &mut rel.ctx
    ))
}

/// Lorentz factor for a sub-light velocity.
pub fn lorentz_factor(
    rel: &mut RelativityContext,
    velocity: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_velocity(rel, velocity)?;
    let c = &rel.constants.c;
    let one = &rel.constants.one;
    // 1 / sqrt(1 - (v / c)²)
    Ok(expr!(one / sqrt(one - pow(velocity / c, 2)), &mut rel.ctx))
}

/// Contracted length (m) of a proper length moving at `velocity`.
pub fn length_contraction_velocity(
    rel: &mut RelativityContext,
    proper_length: &BigFloat,
    velocity: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    check_velocity(rel, velocity)?;
    let c = &rel.constants.c;
    let one = &rel.constants.one;
    Ok(expr!(
        proper_length * sqrt(one - pow(velocity / c, 2)),
        &mut rel.ctx
    ))
}

/// Relativistic momentum (kg·m/s).
pub fn relativistic_momentum(
    rel: &mut RelativityContext,
    mass: &BigFloat,
    velocity: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    let gamma = lorentz_factor(rel, velocity)?;
    Ok(expr!(mass * velocity * gamma, &mut rel.ctx))
}

/// Total relativistic energy (J).
pub fn relativistic_energy(
    rel: &mut RelativityContext,
    mass: &BigFloat,
    velocity: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    let gamma = lorentz_factor(rel, velocity)?;
    let c_squared = &rel.constants.c_squared;
    Ok(expr!(mass * c_squared * gamma, &mut rel.ctx))
}

/// Energy and momentum of a particle taken together.
pub fn four_momentum(
    rel: &mut RelativityContext,
    mass: &BigFloat,
    velocity: &BigFloat,
) -> Result<EnergyMomentum, KinematicsError> {
    let gamma = lorentz_factor(rel, velocity)?;
    let c_squared = &rel.constants.c_squared;
    let energy_j = expr!(mass * c_squared * gamma, &mut rel.ctx);
    let momentum_kg_m_s = expr!(mass * velocity * gamma, &mut rel.ctx);
    Ok(EnergyMomentum {
        energy_j,
        momentum_kg_m_s,
    })
}

/// Invariant (rest) mass of a system from total energy and momentum.
pub fn invariant_mass_from_energy_momentum(
    rel: &mut RelativityContext,
    energy: &BigFloat,
    momentum: &BigFloat,
) -> Result<BigFloat, KinematicsError> {
    let p = rel.precision_bits();
    // m² = (E / c²)² - (p / c)²; for a massless particle the terms cancel
    // exactly, so the difference is taken with plain engine ops and only a
    // non-zero square root goes through the macro.
    let e_term = energy.div(&rel.constants.c_squared, p, ROUNDING);
    let p_term = momentum.div(&rel.constants.c, p, ROUNDING);
    let mass_squared = e_term
        .mul(&e_term, p, ROUNDING)
        .sub(&p_term.mul(&p_term, p, ROUNDING), p, ROUNDING);
    if is_non_finite(&mass_squared) {
        return Err(KinematicsError::NonFinite);
    }
    if mass_squared.is_zero() {
        return Ok(rel.constants.zero.clone());
    }
    if mass_squared.is_negative() {
        return Err(KinematicsError::PrecisionFailure(
            "momentum exceeds total energy; no real rest mass",
        ));
    }
    Ok(expr!(sqrt(mass_squared), &mut rel.ctx))
}

/// Relativistic Doppler shift of light emitted at `frequency` Hz.
pub fn doppler_shift(
    rel: &mut RelativityContext,
    frequency: &BigFloat,
    velocity: &BigFloat,
    direction: DopplerDirection,
) -> Result<BigFloat, KinematicsError> {
    check_velocity(rel, velocity)?;
    let c = &rel.constants.c;
    let one = &rel.constants.one;
    Ok(match direction {
        DopplerDirection::Approaching => expr!(
            frequency * sqrt((one + velocity / c) / (one - velocity / c)),
            &mut rel.ctx
        ),
        DopplerDirection::Receding => expr!(
            frequency * sqrt((one - velocity / c) / (one + velocity / c)),
            &mut rel.ctx
        ),
    })
}

/// Signed squared spacetime interval `c²Δt² − Δx²` between two events (m²).
///
/// Positive for time-like pairs, zero for light-like, negative for
/// space-like; [`min_separation`] turns the sign into a classification.
pub fn spacetime_interval_1d(
    rel: &RelativityContext,
    event1: &Event1D,
    event2: &Event1D,
) -> BigFloat {
    // A light-like pair cancels to an exact zero, which the macro's
    // correct-rounding loop cannot settle on; plain engine ops can.
    let p = rel.precision_bits();
    let dt = event2.t.sub(&event1.t, p, ROUNDING);
    let dx = event2.x.sub(&event1.x, p, ROUNDING);
    rel.constants
        .c_squared
        .mul(&dt.mul(&dt, p, ROUNDING), p, ROUNDING)
        .sub(&dx.mul(&dx, p, ROUNDING), p, ROUNDING)
}

/// Signed squared spacetime interval between two events in 3+1 dimensions (m²).
pub fn spacetime_interval_3d(
    rel: &RelativityContext,
    event1: &Event3D,
    event2: &Event3D,
) -> BigFloat {
    let p = rel.precision_bits();
    let axis = |a: &BigFloat, b: &BigFloat| {
        let d = b.sub(a, p, ROUNDING);
        d.mul(&d, p, ROUNDING)
    };
    let dt_squared = axis(&event1.t, &event2.t);
    rel.constants
        .c_squared
        .mul(&dt_squared, p, ROUNDING)
        .sub(&axis(&event1.x, &event2.x), p, ROUNDING)
        .sub(&axis(&event1.y, &event2.y), p, ROUNDING)
        .sub(&axis(&event1.z, &event2.z), p, ROUNDING)
}

/// Classify a squared interval and report the minimum separation in the
/// frame where the events are closest.
pub fn min_separation(rel: &mut RelativityContext, interval_squared: &BigFloat) -> Separation {
    if interval_squared.is_zero() {
        return Separation::LightLike;
    }
    let c = &rel.constants.c;
    if interval_squared.is_negative() {
        let s = interval_squared.neg();
        Separation::SpaceLike {
            meters: expr!(sqrt(s), &mut rel.ctx),
        }
    } else {
        let s = interval_squared;
        Separation::TimeLike {
            seconds: expr!(sqrt(s) / c, &mut rel.ctx),
        }
    }
}

/// Lorentz boost of an event along x: returns `(t', x')`.
pub fn lorentz_transform_1d(
    rel: &mut RelativityContext,
    t: &BigFloat,
    x: &BigFloat,
    velocity: &BigFloat,
) -> Result<(BigFloat, BigFloat), KinematicsError> {
    let gamma = lorentz_factor(rel, velocity)?;
    let c_squared = &rel.constants.c_squared;
    let t_prime = expr!(gamma * (t - velocity * x / c_squared), &mut rel.ctx);
    let x_prime = expr!(gamma * (x - velocity * t), &mut rel.ctx);
    Ok((t_prime, x_prime))
}

/// Lorentz boost of a 3+1 event along x; y and z pass through unchanged.
pub fn lorentz_transform_3d(
    rel: &mut RelativityContext,
    event: &Event3D,
    velocity: &BigFloat,
) -> Result<Event3D, KinematicsError> {
    let (t_prime, x_prime) = lorentz_transform_1d(rel, &event.t, &event.x, velocity)?;
    Ok(Event3D {
        t: t_prime,
        x: x_prime,
        y: event.y.clone(),
        z: event.z.clone(),
    })
}

/// Time displacement (years) of an FTL round trip with a boosted return leg.
///
/// Rendering-grade arithmetic in units of c = 1 ly/year; negative means
/// arrival in the past. Kept as `f64` since no digit of the paradox
/// bookkeeping is precision-critical.
pub fn time_travel_years(
    distance_ly: f64,
    boost_speed_c: f64,
    warp_time_years: f64,
) -> Result<f64, KinematicsError> {
    if !boost_speed_c.is_finite() {
        return Err(KinematicsError::NonFinite);
    }
    if boost_speed_c.abs() >= 1.0 {
        return Err(KinematicsError::FasterThanLight(format!("{boost_speed_c}c")));
    }
    // Plane-of-simultaneity shift v·Δx/c², minus the time the outbound leg took.
    Ok(warp_time_years - boost_speed_c * distance_ly)
}
