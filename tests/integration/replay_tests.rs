//! Drives the binary with recorded traces.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{batstat_command, replay_command};

#[test]
fn test_charging_trace() {
    replay_command("./tests/replays/charging.jsonl")
        .assert()
        .success()
        .stdout(indoc::indoc! {"
            Calculating charging time...
            Charging: 6h 40m until full
            Charging: 5h 0m until full
        "});
}

#[test]
fn test_full_then_unplugged() {
    replay_command("./tests/replays/full_then_unplugged.jsonl")
        .assert()
        .success()
        .stdout(indoc::indoc! {"
            Calculating charging time...
            Battery full
            Calculating discharging time...
            Discharging: 4d 2h 0m until empty
        "});
}

#[test]
fn test_discharging_averages_all_gaps() {
    replay_command("./tests/replays/discharging.jsonl")
        .assert()
        .success()
        .stdout(indoc::indoc! {"
            Calculating discharging time...
            Discharging: 1h 29m until empty
            Discharging: 2h 56m until empty
        "});
}

#[test]
fn test_history_size_limits_the_average() {
    replay_command("./tests/replays/discharging.jsonl")
        .arg("--history_size")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "Discharging: 4h 24m until empty\n",
        ));
}

#[test]
fn test_bad_lines_are_skipped() {
    replay_command("./tests/replays/bad_line.jsonl")
        .assert()
        .success()
        .stdout(indoc::indoc! {"
            Calculating discharging time...
            Discharging: 1h 29m until empty
        "});
}

#[test]
fn test_missing_trace() {
    replay_command("./tests/replays/does_not_exist.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to start reading the battery"))
        .stderr(predicate::str::contains("could not open"));
}

#[test]
fn test_once_summary() {
    replay_command("./tests/replays/reading.jsonl")
        .arg("--once")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Good "))
        .stdout(predicate::str::contains("Level: 57%"))
        .stdout(predicate::str::contains("Health: Good"))
        .stdout(predicate::str::contains("Plugged: USB"))
        .stdout(predicate::str::contains("Temperature: 23.0°C"))
        .stdout(predicate::str::contains("Voltage: 3.86V"))
        .stdout(predicate::str::contains("Technology: Li-ion"));
}

#[test]
fn test_once_summary_with_display_args() {
    batstat_command(&[
        "-C",
        "./tests/valid_configs/empty_config.toml",
        "--replay",
        "./tests/replays/reading.jsonl",
        "--once",
        "-f",
        "--voltage_pattern",
        "0.000",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Temperature: 73.4°F"))
    .stdout(predicate::str::contains("Voltage: 3.856V"));
}
