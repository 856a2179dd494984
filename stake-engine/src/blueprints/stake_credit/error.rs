use crate::errors::{ApplicationError, RuntimeError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StakeCreditError {
    #[error("amount must be non-zero")]
    ZeroAmount,
    #[error("deposit of {amount} would mint zero shares")]
    ZeroSharesMinted { amount: u128 },
    #[error("requested {requested} shares but only {available} are available")]
    InsufficientShares { requested: u128, available: u128 },
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("pool holds shares but no stake")]
    IllegalState,
}

impl From<StakeCreditError> for RuntimeError {
    fn from(error: StakeCreditError) -> Self {
        Self::ApplicationError(ApplicationError::StakeCreditError(error))
    }
}
