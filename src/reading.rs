//! Reading battery attributes out of a platform snapshot.
//!
//! A snapshot is a bag of named "extras" as delivered by the platform's
//! battery-changed broadcast. [`BatteryReading`] wraps one and exposes typed
//! getters over it. None of the getters fail; missing or unrecognized values
//! come back as documented defaults or sentinels.

pub mod decimal;
pub mod live_time;
pub mod temperature;

use std::collections::HashMap;

use serde::Deserialize;

pub use self::{decimal::DecimalPattern, live_time::LiveTime, temperature::TemperatureType};
use crate::{constants::*, estimator::Observation};

/// A single extra value.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

/// The raw key/value bundle a [`BatteryReading`] is built from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BatteryExtras(HashMap<String, ExtraValue>);

impl BatteryExtras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style version of [`BatteryExtras::insert_int`].
    pub fn with_int(mut self, key: &str, value: i64) -> Self {
        self.insert_int(key, value);
        self
    }

    /// Builder-style version of [`BatteryExtras::insert_str`].
    pub fn with_str(mut self, key: &str, value: &str) -> Self {
        self.insert_str(key, value);
        self
    }

    pub fn insert_int(&mut self, key: &str, value: i64) {
        self.0.insert(key.to_string(), ExtraValue::Int(value));
    }

    pub fn insert_str(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), ExtraValue::Str(value.to_string()));
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtraValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.0.get(key)
    }

    /// Returns the integer stored under `key`, or `default` if it is missing,
    /// not an integer, or does not fit in an `i32`.
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.0.get(key) {
            Some(ExtraValue::Int(value)) => i32::try_from(*value).unwrap_or(default),
            _ => default,
        }
    }

    /// Returns the string stored under `key`, if there is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ExtraValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which power source is connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluggedState {
    Ac,
    Usb,
    Wireless,
    Unknown,
}

impl PluggedState {
    /// Map a raw platform plugged code. Anything unrecognized, including "not
    /// plugged in", is [`PluggedState::Unknown`].
    pub fn from_raw(code: i32) -> Self {
        match code {
            BATTERY_PLUGGED_AC => PluggedState::Ac,
            BATTERY_PLUGGED_USB => PluggedState::Usb,
            BATTERY_PLUGGED_WIRELESS => PluggedState::Wireless,
            _ => PluggedState::Unknown,
        }
    }

    /// The library's own numbering for this state.
    pub fn code(&self) -> i32 {
        match self {
            PluggedState::Ac => 0,
            PluggedState::Usb => 1,
            PluggedState::Wireless => 2,
            PluggedState::Unknown => 3,
        }
    }

    /// Return the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PluggedState::Ac => "AC",
            PluggedState::Usb => "USB",
            PluggedState::Wireless => "Wireless",
            PluggedState::Unknown => "Unknown",
        }
    }
}

/// The physical condition of the battery, as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatteryHealth {
    Cold,
    Dead,
    Good,
    OverVoltage,
    Overheat,
    Unknown,
    /// The platform reported a failure or a code we don't recognize.
    Failure,
}

impl BatteryHealth {
    /// Map a raw platform health code. Unrecognized codes (and a missing
    /// health extra) map to [`BatteryHealth::Failure`].
    pub fn from_raw(code: i32) -> Self {
        match code {
            BATTERY_HEALTH_COLD => BatteryHealth::Cold,
            BATTERY_HEALTH_DEAD => BatteryHealth::Dead,
            BATTERY_HEALTH_GOOD => BatteryHealth::Good,
            BATTERY_HEALTH_OVER_VOLTAGE => BatteryHealth::OverVoltage,
            BATTERY_HEALTH_OVERHEAT => BatteryHealth::Overheat,
            BATTERY_HEALTH_UNKNOWN => BatteryHealth::Unknown,
            _ => BatteryHealth::Failure,
        }
    }

    /// The library's own numbering for this health. [`BatteryHealth::Failure`]
    /// is the `-1` sentinel.
    pub fn code(&self) -> i32 {
        match self {
            BatteryHealth::Cold => 0,
            BatteryHealth::Dead => 1,
            BatteryHealth::Good => 2,
            BatteryHealth::OverVoltage => 3,
            BatteryHealth::Overheat => 4,
            BatteryHealth::Unknown => 5,
            BatteryHealth::Failure => -1,
        }
    }

    /// A short, human-readable description.
    pub fn text(&self) -> &'static str {
        match self {
            BatteryHealth::Cold => "Cold",
            BatteryHealth::Dead => "Dead",
            BatteryHealth::Good => "Good",
            BatteryHealth::OverVoltage => "Bad",
            BatteryHealth::Overheat => "Hot",
            BatteryHealth::Unknown => "N/A",
            BatteryHealth::Failure => "FAIL",
        }
    }
}

/// Typed access to a single battery snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatteryReading {
    extras: BatteryExtras,
}

impl From<BatteryExtras> for BatteryReading {
    fn from(extras: BatteryExtras) -> Self {
        Self { extras }
    }
}

impl BatteryReading {
    pub fn new(extras: BatteryExtras) -> Self {
        Self { extras }
    }

    /// The snapshot this reading was built from.
    pub fn extras(&self) -> &BatteryExtras {
        &self.extras
    }

    /// The current battery level. Defaults to `0`.
    pub fn level(&self) -> i32 {
        self.extras.get_int(EXTRA_LEVEL, 0)
    }

    /// The maximum battery level. Defaults to the `-1` sentinel.
    pub fn scale(&self) -> i32 {
        self.extras.get_int(EXTRA_SCALE, -1)
    }

    /// The level as a fraction of the scale.
    pub fn level_accurate(&self) -> f32 {
        self.level() as f32 / self.scale() as f32
    }

    /// The battery technology, e.g. `"Li-ion"`.
    pub fn technology(&self) -> Option<&str> {
        self.extras.get_str(EXTRA_TECHNOLOGY)
    }

    pub fn plugged_state(&self) -> PluggedState {
        PluggedState::from_raw(self.extras.get_int(EXTRA_PLUGGED, -1))
    }

    /// Whether any power source is connected.
    pub fn is_charging(&self) -> bool {
        !matches!(self.plugged_state(), PluggedState::Unknown)
    }

    pub fn health(&self) -> BatteryHealth {
        BatteryHealth::from_raw(self.extras.get_int(EXTRA_HEALTH, -1))
    }

    pub fn health_text(&self) -> &'static str {
        self.health().text()
    }

    /// The battery temperature in the given unit.
    ///
    /// The raw value is in tenths of a degree Celsius and is truncated to
    /// whole degrees before any conversion.
    pub fn temperature(&self, unit: TemperatureType) -> f64 {
        let celsius = f64::from(self.extras.get_int(EXTRA_TEMPERATURE, 0) / 10);
        unit.convert_from_celsius(celsius)
    }

    pub fn temperature_text(&self, unit: TemperatureType) -> String {
        format!("{:.1}{}", self.temperature(unit), unit.symbol())
    }

    /// The battery voltage in volts, rounded to two decimal places.
    pub fn voltage(&self) -> f64 {
        self.voltage_with_pattern(&DecimalPattern::default())
    }

    /// The battery voltage in volts, rounded as per `pattern`.
    pub fn voltage_with_pattern(&self, pattern: &DecimalPattern) -> f64 {
        pattern.round_thousandths(self.millivolts())
    }

    /// The battery voltage formatted as per `pattern`, e.g. `"4.20V"`.
    pub fn voltage_text(&self, pattern: &DecimalPattern) -> String {
        format!("{}V", pattern.format_thousandths(self.millivolts()))
    }

    /// The three values the estimator needs, stamped with `timestamp_millis`.
    ///
    /// Levels outside of `0..=255` are clamped; the estimator itself ignores
    /// discharging levels above 100.
    pub fn observation(&self, timestamp_millis: u64) -> Observation {
        let level = self.level().clamp(0, i32::from(u8::MAX)) as u8;
        Observation::new(timestamp_millis, level, self.is_charging())
    }

    fn millivolts(&self) -> i64 {
        i64::from(self.extras.get_int(EXTRA_VOLTAGE, 0))
    }
}
