use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn check_reports_countdown_delay_in_milliseconds() {
    let mut cmd = cargo_bin_cmd!("blinkalarm");
    cmd.arg("--check")
        .arg("--mode")
        .arg("countdown")
        .arg("--seconds")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: countdown of 5 s"))
        .stdout(predicate::str::contains("Computed delay: 5000 ms"))
        .stdout(predicate::str::contains("Blink interval: 1000 ms"));
}

#[test]
fn check_accepts_absolute_time_and_custom_blink_settings() {
    let mut cmd = cargo_bin_cmd!("blinkalarm");
    cmd.arg("--check")
        .arg("--mode")
        .arg("time")
        .arg("--time")
        .arg("23:59:59")
        .arg("--color")
        .arg("0,128,255")
        .arg("--interval")
        .arg("3000")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: on time at 23:59:59"))
        .stdout(predicate::str::contains("Blink color: 0, 128, 255"))
        .stdout(predicate::str::contains("Blink interval: 3000 ms"));
}

#[test]
fn malformed_time_fails_with_format_error() {
    let mut cmd = cargo_bin_cmd!("blinkalarm");
    cmd.arg("--check")
        .arg("--mode")
        .arg("time")
        .arg("--time")
        .arg("25:00:00")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time format"));
}

#[test]
fn negative_countdown_fails_with_clear_error() {
    let mut cmd = cargo_bin_cmd!("blinkalarm");
    cmd.arg("--check")
        .arg("--mode")
        .arg("countdown")
        .arg("--seconds=-5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid non-negative number"));
}

#[test]
fn unlisted_interval_is_rejected_by_the_cli() {
    let mut cmd = cargo_bin_cmd!("blinkalarm");
    cmd.arg("--check")
        .arg("--interval")
        .arg("1500")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn malformed_color_is_rejected_by_the_cli() {
    let mut cmd = cargo_bin_cmd!("blinkalarm");
    cmd.arg("--check")
        .arg("--color")
        .arg("300,0,0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("0-255"));
}
