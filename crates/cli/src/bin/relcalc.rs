use astro_float::BigFloat;
use clap::{Parser, Subcommand};
use relativity_calculator::RelativityContext;
use relativity_calculator::rel_core::ROUNDING;
use relativity_calculator::rel_format::{SignificantFormat, format_significant};
use relativity_calculator::rel_kinematics::{
    Event1D, Separation, coordinate_time, flip_and_burn, min_separation, relativistic_distance,
    relativistic_velocity, spacetime_interval_1d,
};
use relativity_calculator::rel_propulsion::{
    photon_rocket_fuel_fraction, pion_rocket_fuel_fraction,
};

#[derive(Parser)]
#[command(author, version, about = "Arbitrary-precision special-relativity calculator")]
struct Cli {
    /// Decimal digits of working precision
    #[arg(long, global = true, default_value_t = relativity_calculator::DEFAULT_DECIMAL_DIGITS)]
    digits: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Accelerate to the midpoint, flip, decelerate to rest
    FlipAndBurn {
        /// One-way distance in light years
        #[arg(long)]
        distance_ly: f64,

        /// Constant proper acceleration in g
        #[arg(long, default_value_t = 1.0)]
        accel_g: f64,
    },
    /// Continuous burn for a given proper time
    Burn {
        /// Constant proper acceleration in g
        #[arg(long)]
        accel_g: f64,

        /// Proper time under thrust in years
        #[arg(long)]
        years: f64,
    },
    /// Propellant mass fraction for a sustained 1g burn
    Fuel {
        /// Proper time under thrust in years
        #[arg(long)]
        years: f64,

        /// Magnetic nozzle effectiveness for the pion drive (0 to 1)
        #[arg(long, default_value_t = 0.85)]
        nozzle_efficiency: f64,
    },
    /// Classify the spacetime interval between two events (seconds, metres)
    Interval {
        #[arg(long)]
        t1: f64,
        #[arg(long)]
        x1: f64,
        #[arg(long)]
        t2: f64,
        #[arg(long)]
        x2: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut rel = RelativityContext::new(cli.digits)?;

    match cli.command {
        Command::FlipAndBurn {
            distance_ly,
            accel_g,
        } => run_flip_and_burn(&mut rel, distance_ly, accel_g),
        Command::Burn { accel_g, years } => run_burn(&mut rel, accel_g, years),
        Command::Fuel {
            years,
            nozzle_efficiency,
        } => run_fuel(&mut rel, years, nozzle_efficiency),
        Command::Interval { t1, x1, t2, x2 } => run_interval(&mut rel, t1, x1, t2, x2),
    }
}

/// Acceleration in m/s² for a multiple of standard gravity.
fn accel_from_g(rel: &RelativityContext, accel_g: f64) -> BigFloat {
    rel.from_f64(accel_g)
        .mul(&rel.constants.g, rel.precision_bits(), ROUNDING)
}

fn run_flip_and_burn(
    rel: &mut RelativityContext,
    distance_ly: f64,
    accel_g: f64,
) -> anyhow::Result<()> {
    let accel = accel_from_g(rel, accel_g);
    let dist = rel.light_years_to_metres(&rel.from_f64(distance_ly));
    let result = flip_and_burn(rel, &accel, &dist)?;

    let proper_years = rel.seconds_to_years(&result.proper_time_s);
    let coord_years = rel.seconds_to_years(&result.coordinate_time_s);
    let peak_fraction = rel.velocity_as_fraction_of_c(&result.peak_velocity_m_s);

    let years_fmt = SignificantFormat::places(2);
    // Near-c peaks are all leading 9s; report the digits after them.
    let velocity_fmt = SignificantFormat::with_ignore_char(4, '9');

    println!("=== Flip and Burn ===");
    println!("Distance        : {distance_ly} ly at {accel_g} g");
    println!(
        "Proper time     : {} years",
        format_significant(rel, &proper_years, &years_fmt)?
    );
    println!(
        "Coordinate time : {} years",
        format_significant(rel, &coord_years, &years_fmt)?
    );
    println!(
        "Peak velocity   : {} c",
        format_significant(rel, &peak_fraction, &velocity_fmt)?
    );
    println!(
        "Peak Lorentz    : {}",
        format_significant(rel, &result.peak_lorentz, &years_fmt)?
    );
    Ok(())
}

fn run_burn(rel: &mut RelativityContext, accel_g: f64, years: f64) -> anyhow::Result<()> {
    let accel = accel_from_g(rel, accel_g);
    let tau = rel.years_to_seconds(&rel.from_f64(years));

    let velocity = relativistic_velocity(rel, &accel, &tau)?;
    let dist = relativistic_distance(rel, &accel, &tau)?;
    let coord = coordinate_time(rel, &accel, &tau)?;

    let fraction = rel.velocity_as_fraction_of_c(&velocity);
    let dist_ly = rel.metres_to_light_years(&dist);
    let coord_years = rel.seconds_to_years(&coord);

    let fmt = SignificantFormat::places(4);
    let velocity_fmt = SignificantFormat::with_ignore_char(4, '9');

    println!("=== Continuous Burn ===");
    println!("Thrust          : {accel_g} g for {years} years proper");
    println!(
        "Velocity        : {} c",
        format_significant(rel, &fraction, &velocity_fmt)?
    );
    println!(
        "Distance        : {} ly",
        format_significant(rel, &dist_ly, &fmt)?
    );
    println!(
        "Coordinate time : {} years",
        format_significant(rel, &coord_years, &fmt)?
    );
    Ok(())
}

fn run_fuel(rel: &mut RelativityContext, years: f64, nozzle_efficiency: f64) -> anyhow::Result<()> {
    let thrust_time = rel.years_to_seconds(&rel.from_f64(years));
    let accel = rel.constants.g.clone();
    let nozzle = rel.from_f64(nozzle_efficiency);
    let ideal = rel.constants.one.clone();

    let pion = pion_rocket_fuel_fraction(rel, &thrust_time, &accel, &nozzle)?;
    let photon = photon_rocket_fuel_fraction(rel, &thrust_time, &accel, &ideal)?;

    let hundred = rel.from_u64(100);
    let p = rel.precision_bits();
    let pion_pct = pion.mul(&hundred, p, ROUNDING);
    let photon_pct = photon.mul(&hundred, p, ROUNDING);

    let fmt = SignificantFormat::places(4);

    println!("=== Propellant Fraction ===");
    println!("Burn            : 1 g for {years} years proper");
    println!(
        "Pion drive      : {} % of initial mass (nozzle {nozzle_efficiency})",
        format_significant(rel, &pion_pct, &fmt)?
    );
    println!(
        "Photon drive    : {} % of initial mass (ideal)",
        format_significant(rel, &photon_pct, &fmt)?
    );
    Ok(())
}

fn run_interval(
    rel: &mut RelativityContext,
    t1: f64,
    x1: f64,
    t2: f64,
    x2: f64,
) -> anyhow::Result<()> {
    let a = Event1D::from_f64(rel, t1, x1);
    let b = Event1D::from_f64(rel, t2, x2);
    let squared = spacetime_interval_1d(rel, &a, &b);

    let fmt = SignificantFormat::places(4);

    println!("=== Spacetime Interval ===");
    println!(
        "Squared interval : {} m²",
        format_significant(rel, &squared, &fmt)?
    );
    match min_separation(rel, &squared) {
        Separation::TimeLike { seconds } => println!(
            "Separation       : time-like, {} s proper time",
            format_significant(rel, &seconds, &fmt)?
        ),
        Separation::LightLike => println!("Separation       : light-like"),
        Separation::SpaceLike { meters } => println!(
            "Separation       : space-like, {} m proper distance",
            format_significant(rel, &meters, &fmt)?
        ),
    }
    Ok(())
}
