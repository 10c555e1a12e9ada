//! These tests are mostly here just to ensure that invalid results will be
//! caught when passing arguments.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{batstat_command, no_cfg_batstat_command};

#[test]
fn test_help() {
    batstat_command(&["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--replay"))
        .stdout(predicate::str::contains("--history_size"));
}

#[test]
fn test_small_rate() {
    no_cfg_batstat_command()
        .arg("-r")
        .arg("249")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 250ms"));
}

#[test]
fn test_invalid_rate() {
    no_cfg_batstat_command()
        .arg("-r")
        .arg("soon")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--rate' was set with an invalid value",
        ));
}

#[test]
fn test_zero_history_size() {
    no_cfg_batstat_command()
        .arg("--history_size")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--history_size' was set with an invalid value",
        ));
}

#[test]
fn test_negative_history_size() {
    no_cfg_batstat_command()
        .arg("--history_size=-1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_voltage_pattern() {
    no_cfg_batstat_command()
        .arg("--voltage_pattern")
        .arg("#.#0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Argument error"))
        .stderr(predicate::str::contains("'#.#0' is an invalid decimal pattern"));
}

#[test]
fn test_conflicting_temps() {
    no_cfg_batstat_command()
        .arg("-c")
        .arg("-f")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_config_file() {
    batstat_command(&["-C", "./tests/valid_configs/does_not_exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be read"));
}
