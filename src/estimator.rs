//! Estimating the time until the battery is full or empty.
//!
//! [`ChargeTimeEstimator`] is fed one [`Observation`] at a time. Each time the
//! level moves in the current direction (down while discharging, up while
//! charging) the time since the previous move is recorded, and the mean of
//! those gaps is multiplied by the number of levels left to go.

pub mod history;

use std::{fmt::Display, num::NonZeroUsize};

pub use self::history::DurationHistory;
use crate::constants::*;

/// One battery sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    /// When the sample was taken, in milliseconds. Observations must be fed in
    /// non-decreasing order.
    pub timestamp_millis: u64,
    /// The battery level, `0..=100`.
    pub level: u8,
    pub is_charging: bool,
}

impl Observation {
    pub fn new(timestamp_millis: u64, level: u8, is_charging: bool) -> Self {
        Self {
            timestamp_millis,
            level,
            is_charging,
        }
    }
}

/// A duration split into whole days, hours and minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemainingTime {
    pub days: u64,
    /// Hours past the whole days, `0..24`.
    pub hours: u64,
    /// Minutes past the whole hours, `0..60`.
    pub minutes: u64,
}

impl RemainingTime {
    pub fn from_millis(millis: u64) -> Self {
        Self {
            days: millis / MILLIS_PER_DAY,
            hours: (millis / MILLIS_PER_HOUR) % 24,
            minutes: (millis / MILLIS_PER_MINUTE) % 60,
        }
    }
}

/// Receives the estimator's output. Each callback fires at most once per
/// observation.
pub trait BatteryTimeListener {
    /// Time left until the battery is full. Days are not reported; charging is
    /// assumed to always take less than a day.
    fn on_charging_estimate(&mut self, hours: u64, minutes: u64);

    /// Charging has started, but there isn't enough data for an estimate yet.
    fn on_calculating_charging(&mut self);

    /// Time left until the battery is empty.
    fn on_discharging_estimate(&mut self, days: u64, hours: u64, minutes: u64);

    /// Discharging has started, but there isn't enough data for an estimate
    /// yet.
    fn on_calculating_discharging(&mut self);

    /// The battery is at 100% while plugged in. Fires on every such
    /// observation.
    fn on_full_battery(&mut self);
}

/// The listener callbacks as values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EstimatorEvent {
    ChargingEstimate { hours: u64, minutes: u64 },
    CalculatingCharging,
    DischargingEstimate { days: u64, hours: u64, minutes: u64 },
    CalculatingDischarging,
    FullBattery,
}

impl EstimatorEvent {
    /// Replay this event onto a listener.
    pub fn dispatch<L: BatteryTimeListener + ?Sized>(&self, listener: &mut L) {
        match *self {
            EstimatorEvent::ChargingEstimate { hours, minutes } => {
                listener.on_charging_estimate(hours, minutes)
            }
            EstimatorEvent::CalculatingCharging => listener.on_calculating_charging(),
            EstimatorEvent::DischargingEstimate {
                days,
                hours,
                minutes,
            } => listener.on_discharging_estimate(days, hours, minutes),
            EstimatorEvent::CalculatingDischarging => listener.on_calculating_discharging(),
            EstimatorEvent::FullBattery => listener.on_full_battery(),
        }
    }
}

impl Display for EstimatorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimatorEvent::ChargingEstimate { hours, minutes } => {
                write!(f, "Charging: {hours}h {minutes}m until full")
            }
            EstimatorEvent::CalculatingCharging => write!(f, "Calculating charging time..."),
            EstimatorEvent::DischargingEstimate {
                days,
                hours,
                minutes,
            } => {
                if *days > 0 {
                    write!(f, "Discharging: {days}d {hours}h {minutes}m until empty")
                } else {
                    write!(f, "Discharging: {hours}h {minutes}m until empty")
                }
            }
            EstimatorEvent::CalculatingDischarging => write!(f, "Calculating discharging time..."),
            EstimatorEvent::FullBattery => write!(f, "Battery full"),
        }
    }
}

impl BatteryTimeListener for Vec<EstimatorEvent> {
    fn on_charging_estimate(&mut self, hours: u64, minutes: u64) {
        self.push(EstimatorEvent::ChargingEstimate { hours, minutes });
    }

    fn on_calculating_charging(&mut self) {
        self.push(EstimatorEvent::CalculatingCharging);
    }

    fn on_discharging_estimate(&mut self, days: u64, hours: u64, minutes: u64) {
        self.push(EstimatorEvent::DischargingEstimate {
            days,
            hours,
            minutes,
        });
    }

    fn on_calculating_discharging(&mut self) {
        self.push(EstimatorEvent::CalculatingDischarging);
    }

    fn on_full_battery(&mut self) {
        self.push(EstimatorEvent::FullBattery);
    }
}

/// The level the discharge marker starts at, so the first discharging
/// observation always counts as a drop.
const INITIAL_DISCHARGE_LEVEL: u8 = FULL_LEVEL + 1;

/// Tracks level changes and produces time estimates.
///
/// At most one of the two histories grows at a time; moving into one
/// direction clears the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChargeTimeEstimator {
    discharge_durations: DurationHistory,
    charge_durations: DurationHistory,
    last_discharge_level: u8,
    last_discharge_timestamp: Option<u64>,
    last_charge_level: u8,
    last_charge_timestamp: Option<u64>,
}

impl Default for ChargeTimeEstimator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ChargeTimeEstimator {
    /// Create a new estimator. With a `history_size`, only that many of the
    /// most recent gaps are averaged.
    pub fn new(history_size: Option<NonZeroUsize>) -> Self {
        Self {
            discharge_durations: DurationHistory::new(history_size),
            charge_durations: DurationHistory::new(history_size),
            last_discharge_level: INITIAL_DISCHARGE_LEVEL,
            last_discharge_timestamp: None,
            last_charge_level: 0,
            last_charge_timestamp: None,
        }
    }

    /// Forget everything, keeping the history size.
    pub fn reset(&mut self) {
        *self = Self::new(self.charge_durations.limit());
    }

    pub fn discharge_history(&self) -> &DurationHistory {
        &self.discharge_durations
    }

    pub fn charge_history(&self) -> &DurationHistory {
        &self.charge_durations
    }

    /// Feed one observation, reporting anything it produces to `listener`.
    pub fn observe<L: BatteryTimeListener + ?Sized>(
        &mut self, observation: Observation, listener: &mut L,
    ) {
        let Observation {
            timestamp_millis: now,
            level,
            is_charging,
        } = observation;

        if !is_charging && level <= FULL_LEVEL {
            if level < self.last_discharge_level {
                match self.last_discharge_timestamp {
                    Some(last) => {
                        self.discharge_durations.push(gap(last, now));
                        let remaining = estimate(&self.discharge_durations, level.into());
                        log::debug!("discharged to {level}%, {remaining:?} left");
                        listener.on_discharging_estimate(
                            remaining.days,
                            remaining.hours,
                            remaining.minutes,
                        );
                    }
                    None => {
                        log::debug!("discharging from {level}%, calculating");
                        listener.on_calculating_discharging();
                    }
                }

                self.last_discharge_timestamp = Some(now);
                self.last_discharge_level = level;
            }

            self.charge_durations.clear();
            self.last_charge_level = 0;
            self.last_charge_timestamp = None;
        }

        if is_charging {
            if self.last_charge_level < level {
                match self.last_charge_timestamp {
                    Some(last) => {
                        self.charge_durations.push(gap(last, now));
                        let remaining = estimate(
                            &self.charge_durations,
                            FULL_LEVEL.saturating_sub(level).into(),
                        );
                        log::debug!("charged to {level}%, {remaining:?} left");
                        listener.on_charging_estimate(remaining.hours, remaining.minutes);
                    }
                    None => {
                        log::debug!("charging from {level}%, calculating");
                        listener.on_calculating_charging();
                    }
                }

                self.last_charge_timestamp = Some(now);
                self.last_charge_level = level;
            }

            if level == FULL_LEVEL {
                listener.on_full_battery();
            }

            self.discharge_durations.clear();
            self.last_discharge_level = FULL_LEVEL;
            self.last_discharge_timestamp = None;
        }
    }

    /// Convenience wrapper around [`ChargeTimeEstimator::observe`] that
    /// collects the produced events.
    pub fn observe_events(&mut self, observation: Observation) -> Vec<EstimatorEvent> {
        let mut events = Vec::with_capacity(2);
        self.observe(observation, &mut events);
        events
    }
}

/// The mean gap times the levels left to go.
fn estimate(history: &DurationHistory, remaining_levels: u64) -> RemainingTime {
    // Only called right after a push, so there is always an average.
    let average = history.average().unwrap_or_default();
    RemainingTime::from_millis(average.saturating_mul(remaining_levels))
}

/// The time between two observations. Observations are expected in order; if
/// time goes backwards the gap is treated as zero.
fn gap(last: u64, now: u64) -> u64 {
    now.checked_sub(last).unwrap_or_else(|| {
        log::warn!("observation at {now}ms is older than the previous one at {last}ms");
        0
    })
}
