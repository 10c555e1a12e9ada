//! These tests are for testing some invalid config-file-specific options.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::batstat_command;

#[test]
fn test_toml_mismatch_type() {
    batstat_command(&["-C", "./tests/invalid_configs/toml_mismatch_type.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid type"));
}

/// This test isn't really needed as duplicate keys are already invalid TOML.
/// However, I feel like it's worth checking anyways - not like it takes long.
#[test]
fn test_duplicate_temp_type() {
    batstat_command(&["-C", "./tests/invalid_configs/duplicate_temp_type.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate key"));
}

#[test]
fn test_zero_history_size() {
    batstat_command(&["-C", "./tests/invalid_configs/zero_history_size.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'history_size' was set with an invalid value",
        ));
}

#[test]
fn test_invalid_temperature_type() {
    batstat_command(&[
        "-C",
        "./tests/invalid_configs/invalid_temperature_type.toml",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains(
        "'rankine' is an invalid temperature type",
    ));
}

#[test]
fn test_invalid_voltage_pattern() {
    batstat_command(&[
        "-C",
        "./tests/invalid_configs/invalid_voltage_pattern.toml",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Configuration file error"))
    .stderr(predicate::str::contains("more than one decimal point"));
}

#[test]
fn test_lower_rate() {
    batstat_command(&["-C", "./tests/invalid_configs/lower_rate.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 250ms"));
}

#[test]
fn test_invalid_rate() {
    batstat_command(&["-C", "./tests/invalid_configs/invalid_rate.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'rate' was set with an invalid value",
        ));
}
