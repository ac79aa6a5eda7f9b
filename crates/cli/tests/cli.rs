use assert_cmd::Command;
use predicates::prelude::*;

fn relcalc() -> Command {
    Command::cargo_bin("relcalc").expect("relcalc bin")
}

#[test]
fn flip_and_burn_reports_times_and_peak_velocity() {
    let output = relcalc()
        .args(["flip-and-burn", "--distance-ly", "4.3"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("utf8 stdout");

    assert!(stdout.contains("=== Flip and Burn ==="), "{stdout}");
    assert!(stdout.contains("Proper time"), "{stdout}");
    assert!(stdout.contains("Coordinate time"), "{stdout}");
    // Peak velocity is sub-light, so the fraction of c starts "0.9...".
    assert!(stdout.contains("Peak velocity   : 0.9"), "{stdout}");
    assert!(
        !stdout.contains("e+") && !stdout.contains("e-"),
        "scientific notation leaked:\n{stdout}"
    );
}

#[test]
fn burn_reports_velocity_below_c() {
    relcalc()
        .args(["burn", "--accel-g", "1.0", "--years", "1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Velocity        : 0.7"));
}

#[test]
fn fuel_reports_both_drives() {
    let output = relcalc()
        .args(["fuel", "--years", "3.52"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("utf8 stdout");

    assert!(stdout.contains("Pion drive"), "{stdout}");
    assert!(stdout.contains("Photon drive"), "{stdout}");
}

#[test]
fn interval_classifies_time_like_pair() {
    relcalc()
        .args([
            "interval", "--t1", "0", "--x1", "0", "--t2", "1", "--x2", "1000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("time-like"));
}

#[test]
fn interval_classifies_space_like_pair() {
    relcalc()
        .args([
            "interval", "--t1", "0", "--x1", "0", "--t2", "0", "--x2", "1000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("space-like"));
}

#[test]
fn interval_classifies_light_like_pair() {
    // Exact cancellation must return promptly, not spin in the engine.
    relcalc()
        .args([
            "interval", "--t1", "0", "--x1", "0", "--t2", "1", "--x2", "299792458",
        ])
        .timeout(std::time::Duration::from_secs(60))
        .assert()
        .success()
        .stdout(predicate::str::contains("light-like"));
}

#[test]
fn digits_below_one_is_an_error() {
    relcalc()
        .args(["--digits", "0", "burn", "--accel-g", "1.0", "--years", "1.0"])
        .assert()
        .failure();
}
