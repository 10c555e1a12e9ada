use time::OffsetDateTime;

/// The rough part of the day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiveTime {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl LiveTime {
    /// The part of the day for an hour in `0..24`.
    pub fn from_hour(hour: u8) -> Option<Self> {
        match hour {
            0..=11 => Some(LiveTime::Morning),
            12..=15 => Some(LiveTime::Afternoon),
            16..=20 => Some(LiveTime::Evening),
            21..=23 => Some(LiveTime::Night),
            _ => None,
        }
    }

    /// The part of the day right now, by the local clock. Falls back to UTC if
    /// the local offset can't be determined (e.g. on some multithreaded Unix
    /// processes).
    pub fn now() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

        // Hours from the time crate are always in 0..24.
        Self::from_hour(now.hour()).unwrap_or(LiveTime::Night)
    }

    pub fn greeting(&self) -> &'static str {
        match self {
            LiveTime::Morning => "Good morning!",
            LiveTime::Afternoon => "Good afternoon!",
            LiveTime::Evening => "Good evening!",
            LiveTime::Night => "Good night!",
        }
    }
}
