use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EpochManagerSubstate {
    pub epoch: Epoch,
    /// Ledger time of the last epoch transition (or of genesis), in microseconds.
    pub last_transition_time_micros: u64,
    /// Current ledger time, advanced by the block prologue.
    pub current_time_micros: u64,
}
