use std::time::Duration;

// Snapshot extras, named after the platform's battery-changed broadcast.
pub const EXTRA_LEVEL: &str = "level";
pub const EXTRA_SCALE: &str = "scale";
pub const EXTRA_VOLTAGE: &str = "voltage";
pub const EXTRA_TEMPERATURE: &str = "temperature";
pub const EXTRA_TECHNOLOGY: &str = "technology";
pub const EXTRA_HEALTH: &str = "health";
pub const EXTRA_PLUGGED: &str = "plugged";
pub const EXTRA_PRESENT: &str = "present";
pub const EXTRA_STATUS: &str = "status";

/// The key in a replay line holding the snapshot time, in milliseconds.
pub const REPLAY_TIMESTAMP: &str = "timestamp";

// Raw plugged codes.
pub const BATTERY_PLUGGED_AC: i32 = 1;
pub const BATTERY_PLUGGED_USB: i32 = 2;
pub const BATTERY_PLUGGED_WIRELESS: i32 = 4;

// Raw health codes.
pub const BATTERY_HEALTH_UNKNOWN: i32 = 1;
pub const BATTERY_HEALTH_GOOD: i32 = 2;
pub const BATTERY_HEALTH_OVERHEAT: i32 = 3;
pub const BATTERY_HEALTH_DEAD: i32 = 4;
pub const BATTERY_HEALTH_OVER_VOLTAGE: i32 = 5;
pub const BATTERY_HEALTH_UNSPECIFIED_FAILURE: i32 = 6;
pub const BATTERY_HEALTH_COLD: i32 = 7;

// Raw status codes.
pub const BATTERY_STATUS_UNKNOWN: i32 = 1;
pub const BATTERY_STATUS_CHARGING: i32 = 2;
pub const BATTERY_STATUS_DISCHARGING: i32 = 3;
pub const BATTERY_STATUS_NOT_CHARGING: i32 = 4;
pub const BATTERY_STATUS_FULL: i32 = 5;

/// The highest battery level.
pub const FULL_LEVEL: u8 = 100;

pub const MILLIS_PER_MINUTE: u64 = 60 * 1000;
pub const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// The default voltage rounding pattern.
pub const DEFAULT_VOLTAGE_PATTERN: &str = "#.##";

/// How often the host battery is polled by default.
pub const DEFAULT_RATE: Duration = Duration::from_millis(1000);

/// The fastest allowed polling rate.
pub const MIN_RATE: Duration = Duration::from_millis(250);

// Config and flags
pub const DEFAULT_CONFIG_FILE_LOCATION: &str = "batstat/batstat.toml";

pub const CONFIG_TEMPLATE: &str = r##"# This is a default config file for batstat. All of the settings are commented
# out by default; if you wish to change them uncomment and modify as you see
# fit.

#[estimator]
# How many level transitions to average over. Unbounded if not set.
#history_size = 10

#[display]
# One of "celsius", "c", "kelvin", "k", "fahrenheit", "f".
#temperature_type = "celsius"
# How to round voltages, e.g. "#.##" or "0.000".
#voltage_pattern = "#.##"

#[source]
# How often to poll the host battery. Either a number in milliseconds or a
# human-readable time like "5s".
#rate = "1s"
"##;
