//! Checks that config file values are used, and that arguments win over them.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::batstat_command;

const ALL_OPTIONS: &str = "./tests/valid_configs/all_options.toml";

#[test]
fn test_config_history_size() {
    batstat_command(&[
        "-C",
        ALL_OPTIONS,
        "--replay",
        "./tests/replays/discharging.jsonl",
    ])
    .assert()
    .success()
    .stdout(predicate::str::ends_with(
        "Discharging: 4h 24m until empty\n",
    ));
}

#[test]
fn test_args_override_config() {
    batstat_command(&[
        "-C",
        ALL_OPTIONS,
        "--replay",
        "./tests/replays/discharging.jsonl",
        "--history_size",
        "5",
    ])
    .assert()
    .success()
    .stdout(predicate::str::ends_with(
        "Discharging: 2h 56m until empty\n",
    ));
}

#[test]
fn test_config_display_options() {
    batstat_command(&[
        "-C",
        ALL_OPTIONS,
        "--replay",
        "./tests/replays/reading.jsonl",
        "--once",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Temperature: 73.4°F"))
    .stdout(predicate::str::contains("Voltage: 3.856V"));
}

#[test]
fn test_generated_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batstat.toml");
    std::fs::write(&path, "[display]\ntemperature_type = \"c\"\n").unwrap();

    batstat_command(&[
        "-C",
        path.to_str().unwrap(),
        "--replay",
        "./tests/replays/reading.jsonl",
        "--once",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Temperature: 23.0°C"));
}
