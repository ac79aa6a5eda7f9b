//! Relativistic rocket estimators for matter-antimatter propulsion.
//!
//! Two exhaust models share the same rocket-equation backbone. A photon
//! rocket converts annihilation energy into perfectly collimated light, so
//! its effective exhaust velocity is `efficiency * c`. A charged-pion rocket
//! magnetically deflects the pi+ / pi- products; the pi0 third of the energy
//! decays to undirectable gamma rays, capping the exhaust velocity at
//! `0.94c * (2/3) * nozzle_efficiency`.
//!
//! Burn times come from `t = (v_e / a) * ln(M0 / Mf)`; propellant fractions
//! invert the same relation as `1 - exp(-a * t / v_e)`.

use astro_float::{BigFloat, expr};
use rel_core::{RelativityContext, is_non_finite};
use thiserror::Error;

/// Charged-pion exhaust speed as a fraction of c, before nozzle losses.
const PION_EXHAUST_FRACTION: (u64, u64) = (94, 100);

/// Energy fraction carried by charged pions; the neutral third is lost.
const CHARGED_PION_FRACTION: (u64, u64) = (2, 3);

/// Errors raised by the rocket estimators.
#[derive(Debug, Error)]
pub enum PropulsionError {
    /// A mass, efficiency, or acceleration was negative, zero where a
    /// positive value is required, or otherwise unphysical.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// A NaN or infinity was passed in.
    #[error("input is not finite")]
    NonFinite,
}

fn check_mass(mass: &BigFloat) -> Result<(), PropulsionError> {
    if is_non_finite(mass) {
        return Err(PropulsionError::NonFinite);
    }
    if mass.is_negative() {
        return Err(PropulsionError::InvalidParameter("mass must be non-negative"));
    }
    Ok(())
}

fn check_efficiency(efficiency: &BigFloat) -> Result<(), PropulsionError> {
    if is_non_finite(efficiency) {
        return Err(PropulsionError::NonFinite);
    }
    if efficiency.is_negative() {
        return Err(PropulsionError::InvalidParameter(
            "efficiency must be non-negative",
        ));
    }
    Ok(())
}

fn check_acceleration(accel: &BigFloat) -> Result<(), PropulsionError> {
    if is_non_finite(accel) {
        return Err(PropulsionError::NonFinite);
    }
    if accel.is_zero() || accel.is_negative() {
        return Err(PropulsionError::InvalidParameter(
            "acceleration must be positive",
        ));
    }
    Ok(())
}

/// Effective exhaust velocity (m/s) of a charged-pion rocket.
pub fn pion_exhaust_velocity(rel: &mut RelativityContext, nozzle_efficiency: &BigFloat) -> BigFloat {
    let base = rel.from_ratio(PION_EXHAUST_FRACTION.0, PION_EXHAUST_FRACTION.1);
    let charged = rel.from_ratio(CHARGED_PION_FRACTION.0, CHARGED_PION_FRACTION.1);
    let c = &rel.constants.c;
    expr!(base * c * charged * nozzle_efficiency, &mut rel.ctx)
}

fn accel_time(
    rel: &mut RelativityContext,
    fuel_mass: &BigFloat,
    dry_mass: &BigFloat,
    exhaust_velocity: &BigFloat,
    accel: &BigFloat,
) -> Result<BigFloat, PropulsionError> {
    check_mass(fuel_mass)?;
    check_mass(dry_mass)?;
    check_acceleration(accel)?;
    let initial_mass = expr!(dry_mass + fuel_mass, &mut rel.ctx);
    // No fuel (or no exhaust) means no burn, not an error.
    if !initial_mass.gt(dry_mass) || exhaust_velocity.is_zero() {
        return Ok(rel.constants.zero.clone());
    }
    Ok(expr!(
        (exhaust_velocity / accel) * ln(initial_mass / dry_mass),
        &mut rel.ctx
    ))
}

fn fuel_fraction(
    rel: &mut RelativityContext,
    thrust_time: &BigFloat,
    exhaust_velocity: &BigFloat,
    accel: &BigFloat,
) -> Result<BigFloat, PropulsionError> {
    if is_non_finite(thrust_time) {
        return Err(PropulsionError::NonFinite);
    }
    if thrust_time.is_negative() {
        return Err(PropulsionError::InvalidParameter(
            "thrust time must be non-negative",
        ));
    }
    check_acceleration(accel)?;
    if exhaust_velocity.is_zero() {
        return Ok(rel.constants.zero.clone());
    }
    let one = &rel.constants.one;
    // 1 - Mf/M0 where M0/Mf = exp(a * t / v_e)
    Ok(expr!(
        one - one / exp(accel * thrust_time / exhaust_velocity),
        &mut rel.ctx
    ))
}

/// Seconds a photon rocket can hold acceleration `accel` while annihilating
/// `fuel_mass` kg down to `dry_mass` kg.
///
/// `efficiency` is the fraction of annihilation energy that becomes
/// collimated thrust; 1.0 is the ideal photon drive.
pub fn photon_rocket_accel_time(
    rel: &mut RelativityContext,
    fuel_mass: &BigFloat,
    dry_mass: &BigFloat,
    efficiency: &BigFloat,
    accel: &BigFloat,
) -> Result<BigFloat, PropulsionError> {
    check_efficiency(efficiency)?;
    let c = &rel.constants.c;
    let exhaust_velocity = expr!(efficiency * c, &mut rel.ctx);
    accel_time(rel, fuel_mass, dry_mass, &exhaust_velocity, accel)
}

/// Seconds a charged-pion rocket can hold acceleration `accel`.
pub fn pion_rocket_accel_time(
    rel: &mut RelativityContext,
    fuel_mass: &BigFloat,
    dry_mass: &BigFloat,
    nozzle_efficiency: &BigFloat,
    accel: &BigFloat,
) -> Result<BigFloat, PropulsionError> {
    check_efficiency(nozzle_efficiency)?;
    let exhaust_velocity = pion_exhaust_velocity(rel, nozzle_efficiency);
    accel_time(rel, fuel_mass, dry_mass, &exhaust_velocity, accel)
}

/// Propellant mass fraction (fuel over initial mass, 0 to 1) a photon
/// rocket needs to hold `accel` for `thrust_time` seconds.
pub fn photon_rocket_fuel_fraction(
    rel: &mut RelativityContext,
    thrust_time: &BigFloat,
    accel: &BigFloat,
    efficiency: &BigFloat,
) -> Result<BigFloat, PropulsionError> {
    check_efficiency(efficiency)?;
    let c = &rel.constants.c;
    let exhaust_velocity = expr!(efficiency * c, &mut rel.ctx);
    fuel_fraction(rel, thrust_time, &exhaust_velocity, accel)
}

/// Propellant mass fraction a charged-pion rocket needs to hold `accel`
/// for `thrust_time` seconds.
pub fn pion_rocket_fuel_fraction(
    rel: &mut RelativityContext,
    thrust_time: &BigFloat,
    accel: &BigFloat,
    nozzle_efficiency: &BigFloat,
) -> Result<BigFloat, PropulsionError> {
    check_efficiency(nozzle_efficiency)?;
    let exhaust_velocity = pion_exhaust_velocity(rel, nozzle_efficiency);
    fuel_fraction(rel, thrust_time, &exhaust_velocity, accel)
}
