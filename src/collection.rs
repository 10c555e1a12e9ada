//! Where battery snapshots come from.
//!
//! The estimator doesn't care how snapshots are produced; a source just hands
//! them out one at a time. Two sources are provided: a replayed trace file,
//! and (with the `battery` feature) the host's own battery.

pub mod replay;

cfg_if::cfg_if! {
    if #[cfg(feature = "battery")] {
        pub mod batteries;
        pub use self::batteries::HostSource;
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

pub use self::replay::ReplaySource;
use crate::{reading::BatteryExtras, utils::error::Result};

/// A battery snapshot and when it was taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub timestamp_millis: u64,
    pub extras: BatteryExtras,
}

impl Snapshot {
    pub fn new(timestamp_millis: u64, extras: BatteryExtras) -> Self {
        Self {
            timestamp_millis,
            extras,
        }
    }

    /// A snapshot stamped with the current wall-clock time.
    pub fn now(extras: BatteryExtras) -> Self {
        Self::new(current_millis(), extras)
    }
}

/// Something that produces battery snapshots.
pub trait ObservationSource {
    /// The next snapshot, or [`None`] if the source has run out.
    fn next_snapshot(&mut self) -> Result<Option<Snapshot>>;

    /// Whether the caller should wait between polls. Live sources are paced;
    /// recorded ones are read as fast as possible.
    fn is_paced(&self) -> bool {
        true
    }
}

impl<S: ObservationSource + ?Sized> ObservationSource for Box<S> {
    fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
        (**self).next_snapshot()
    }

    fn is_paced(&self) -> bool {
        (**self).is_paced()
    }
}

/// Milliseconds since the Unix epoch.
pub(crate) fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
