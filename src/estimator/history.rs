use std::{collections::VecDeque, num::NonZeroUsize};

/// The gaps, in milliseconds, between consecutive level changes in one
/// direction.
///
/// With a limit set, the oldest gap is dropped once the history is full.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DurationHistory {
    gaps: VecDeque<u64>,
    limit: Option<NonZeroUsize>,
}

impl DurationHistory {
    pub fn new(limit: Option<NonZeroUsize>) -> Self {
        Self {
            gaps: VecDeque::new(),
            limit,
        }
    }

    pub fn push(&mut self, gap_millis: u64) {
        if let Some(limit) = self.limit {
            while self.gaps.len() >= limit.get() {
                self.gaps.pop_front();
            }
        }

        self.gaps.push_back(gap_millis);
    }

    pub fn clear(&mut self) {
        self.gaps.clear();
    }

    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    pub fn iter(&self) -> impl Iterator<Item = &u64> + '_ {
        self.gaps.iter()
    }

    /// The truncated mean gap, or [`None`] if there are no gaps yet.
    pub fn average(&self) -> Option<u64> {
        let count = self.gaps.len() as u64;
        if count == 0 {
            return None;
        }

        let sum = self.gaps.iter().fold(0_u64, |acc, gap| acc.saturating_add(*gap));
        Some(sum / count)
    }
}
