//! Uses the battery crate.
//!
//! Covers battery usage for:
//! - Linux 2.6.39+
//! - MacOS 10.10+
//! - iOS
//! - Windows 7+
//! - FreeBSD
//! - DragonFlyBSD
//!
//! For more information, refer to the [starship_battery](https://github.com/starship/rust-battery) repo/docs.
//!
//! The host battery is translated into the same extras a platform snapshot
//! would carry, so the rest of the crate doesn't know the difference.

use starship_battery::{
    units::{
        electric_potential::millivolt, ratio::percent, thermodynamic_temperature::degree_celsius,
    },
    Battery, Manager, State,
};

use super::{ObservationSource, Snapshot};
use crate::{
    constants::*,
    reading::BatteryExtras,
    utils::error::{BatstatError, Result},
};

/// Below this state of health, a battery is reported as dead.
const DEAD_HEALTH_PERCENT: f32 = 50.0;

/// Polls the first battery the host reports.
pub struct HostSource {
    manager: Manager,
    battery: Battery,
}

impl HostSource {
    pub fn new() -> Result<Self> {
        let manager = Manager::new().map_err(|err| BatstatError::collection(err.to_string()))?;
        let battery = manager
            .batteries()
            .map_err(|err| BatstatError::collection(err.to_string()))?
            .next()
            .ok_or_else(|| BatstatError::collection("no battery was found on this machine"))?
            .map_err(|err| BatstatError::collection(err.to_string()))?;

        Ok(Self { manager, battery })
    }
}

impl ObservationSource for HostSource {
    fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
        self.manager
            .refresh(&mut self.battery)
            .map_err(|err| BatstatError::collection(err.to_string()))?;

        Ok(Some(Snapshot::now(battery_extras(&self.battery))))
    }
}

fn battery_extras(battery: &Battery) -> BatteryExtras {
    let state = battery.state();
    let mut extras = BatteryExtras::new()
        .with_int(EXTRA_LEVEL, battery.state_of_charge().get::<percent>().round() as i64)
        .with_int(EXTRA_SCALE, 100)
        .with_int(EXTRA_VOLTAGE, battery.voltage().get::<millivolt>().round() as i64)
        .with_int(EXTRA_PLUGGED, plugged_code(state).into())
        .with_int(EXTRA_STATUS, status_code(state).into())
        .with_int(
            EXTRA_HEALTH,
            health_code(state, battery.state_of_health().get::<percent>()).into(),
        )
        .with_str(EXTRA_TECHNOLOGY, &battery.technology().to_string());

    if let Some(temperature) = battery.temperature() {
        let tenths = (temperature.get::<degree_celsius>() * 10.0).round() as i64;
        extras.insert_int(EXTRA_TEMPERATURE, tenths);
    }

    extras
}

/// The host doesn't say which kind of charger is connected, so anything that
/// is charging is treated as being on AC.
fn plugged_code(state: State) -> i32 {
    match state {
        State::Charging | State::Full => BATTERY_PLUGGED_AC,
        State::Discharging | State::Empty | State::Unknown => 0,
    }
}

fn status_code(state: State) -> i32 {
    match state {
        State::Charging => BATTERY_STATUS_CHARGING,
        State::Discharging => BATTERY_STATUS_DISCHARGING,
        State::Empty => BATTERY_STATUS_NOT_CHARGING,
        State::Full => BATTERY_STATUS_FULL,
        State::Unknown => BATTERY_STATUS_UNKNOWN,
    }
}

fn health_code(state: State, health_percent: f32) -> i32 {
    if matches!(state, State::Unknown) || !health_percent.is_finite() {
        BATTERY_HEALTH_UNKNOWN
    } else if health_percent < DEAD_HEALTH_PERCENT {
        BATTERY_HEALTH_DEAD
    } else {
        BATTERY_HEALTH_GOOD
    }
}
