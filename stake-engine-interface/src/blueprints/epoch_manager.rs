use crate::types::*;
use sbor::Sbor;

/// Snapshot of the epoch clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sbor)]
pub struct EpochInfo {
    pub epoch: Epoch,
    pub last_transition_time_micros: u64,
    pub epoch_interval_micros: u64,
}

impl EpochInfo {
    /// The earliest ledger time at which the next transition may be triggered.
    pub fn next_transition_time_micros(&self) -> u64 {
        self.last_transition_time_micros
            .saturating_add(self.epoch_interval_micros)
    }

    /// Whether enough time has elapsed at `now_micros` to move to the next epoch.
    pub fn is_transition_due(&self, now_micros: u64) -> bool {
        now_micros >= self.next_transition_time_micros()
    }
}
