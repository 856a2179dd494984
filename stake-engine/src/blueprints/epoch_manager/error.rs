use crate::errors::{ApplicationError, RuntimeError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EpochManagerError {
    #[error("epoch transition not ready: now {now_micros}, next transition at {next_transition_micros}")]
    NotReady {
        now_micros: u64,
        next_transition_micros: u64,
    },
    #[error("timestamp may not decrease from {current_micros} to {proposed_micros}")]
    TimestampDecreased {
        current_micros: u64,
        proposed_micros: u64,
    },
    #[error("epoch number overflow")]
    EpochOverflow,
}

impl From<EpochManagerError> for RuntimeError {
    fn from(error: EpochManagerError) -> Self {
        Self::ApplicationError(ApplicationError::EpochManagerError(error))
    }
}
