use astro_float::BigFloat;
use relativity_calculator::RelativityContext;
use relativity_calculator::rel_core::ROUNDING;
use relativity_calculator::rel_propulsion::{
    PropulsionError, photon_rocket_accel_time, photon_rocket_fuel_fraction,
    pion_rocket_accel_time, pion_rocket_fuel_fraction,
};

fn ctx() -> RelativityContext {
    RelativityContext::default()
}

fn assert_close(rel: &RelativityContext, a: &BigFloat, b: &BigFloat, tolerance: &str) {
    let p = rel.precision_bits();
    let diff = a.sub(b, p, ROUNDING).abs();
    let tol = rel.parse(tolerance).expect("tolerance");
    assert!(diff.le(&tol), "|{a} - {b}| = {diff} above {tolerance}");
}

#[test]
fn fuel_fraction_grows_with_burn_time() {
    let mut rel = ctx();
    let accel = rel.constants.g.clone();
    let nozzle = rel.parse("0.85").expect("parse");
    let one_year = rel.years_to_seconds(&rel.from_u64(1));
    let two_years = rel.years_to_seconds(&rel.from_u64(2));

    let short = pion_rocket_fuel_fraction(&mut rel, &one_year, &accel, &nozzle).expect("short");
    let long = pion_rocket_fuel_fraction(&mut rel, &two_years, &accel, &nozzle).expect("long");

    assert!(long.gt(&short));
    assert!(short.gt(&rel.constants.zero));
    assert!(long.lt(&rel.constants.one));
}

#[test]
fn ideal_photon_drive_beats_the_pion_drive() {
    let mut rel = ctx();
    let accel = rel.constants.g.clone();
    let burn = rel.years_to_seconds(&rel.parse("3.52").expect("parse"));
    let ideal = rel.constants.one.clone();
    let nozzle = rel.parse("0.85").expect("parse");

    let photon =
        photon_rocket_fuel_fraction(&mut rel, &burn, &accel, &ideal).expect("photon fraction");
    let pion =
        pion_rocket_fuel_fraction(&mut rel, &burn, &accel, &nozzle).expect("pion fraction");

    // The pion exhaust is slower, so the same burn costs more propellant.
    assert!(pion.gt(&photon));
}

#[test]
fn accel_time_and_fuel_fraction_are_inverses() {
    let mut rel = ctx();
    let accel = rel.constants.g.clone();
    let nozzle = rel.parse("0.85").expect("parse");
    let fuel = rel.from_u64(1000);
    let dry = rel.from_u64(500);

    let burn = pion_rocket_accel_time(&mut rel, &fuel, &dry, &nozzle, &accel).expect("burn time");
    let fraction =
        pion_rocket_fuel_fraction(&mut rel, &burn, &accel, &nozzle).expect("fraction");

    // fuel / (dry + fuel) = 1000 / 1500
    assert_close(&rel, &fraction, &rel.from_ratio(2, 3), "1e-100");
}

#[test]
fn no_fuel_means_no_burn() {
    let mut rel = ctx();
    let accel = rel.constants.g.clone();
    let efficiency = rel.constants.one.clone();
    let fuel = rel.constants.zero.clone();
    let dry = rel.from_u64(500);

    let burn = photon_rocket_accel_time(&mut rel, &fuel, &dry, &efficiency, &accel)
        .expect("burn time");
    assert!(burn.is_zero());
}

#[test]
fn longer_burn_with_a_better_nozzle() {
    let mut rel = ctx();
    let accel = rel.constants.g.clone();
    let fuel = rel.from_u64(1000);
    let dry = rel.from_u64(500);
    let poor = rel.parse("0.5").expect("parse");
    let good = rel.parse("0.85").expect("parse");

    let slow = pion_rocket_accel_time(&mut rel, &fuel, &dry, &poor, &accel).expect("poor nozzle");
    let fast = pion_rocket_accel_time(&mut rel, &fuel, &dry, &good, &accel).expect("good nozzle");
    assert!(fast.gt(&slow));
}

#[test]
fn unphysical_parameters_are_rejected() {
    let mut rel = ctx();
    let accel = rel.constants.g.clone();
    let efficiency = rel.constants.one.clone();
    let dry = rel.from_u64(500);
    let negative_fuel = rel.from_i64(-10);

    assert!(matches!(
        photon_rocket_accel_time(&mut rel, &negative_fuel, &dry, &efficiency, &accel),
        Err(PropulsionError::InvalidParameter(_))
    ));

    let fuel = rel.from_u64(1000);
    let negative_efficiency = rel.from_i64(-1);
    assert!(matches!(
        pion_rocket_accel_time(&mut rel, &fuel, &dry, &negative_efficiency, &accel),
        Err(PropulsionError::InvalidParameter(_))
    ));

    let burn = rel.from_u64(1000);
    let zero_accel = rel.constants.zero.clone();
    assert!(matches!(
        photon_rocket_fuel_fraction(&mut rel, &burn, &zero_accel, &efficiency),
        Err(PropulsionError::InvalidParameter(_))
    ));
}
