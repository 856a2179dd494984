use crate::blueprints::cross_chain::CrossChainError;
use crate::blueprints::epoch_manager::EpochManagerError;
use crate::blueprints::genesis::GenesisError;
use crate::blueprints::stake_config::StakeConfigError;
use crate::blueprints::stake_credit::StakeCreditError;
use crate::blueprints::validator_manager::ValidatorManagerError;
use crate::types::*;

/// Represents an error when executing a transaction. Any error aborts the whole transaction and
/// leaves the ledger unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The caller is not allowed to invoke the operation.
    #[error("auth error: {0}")]
    AuthError(AuthError),

    /// An error occurred within the transaction machinery itself.
    #[error("system error: {0}")]
    SystemError(SystemError),

    /// An error occurred within application logic, like the staking blueprints.
    #[error("application error: {0}")]
    ApplicationError(ApplicationError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("caller {actual} is not {expected}")]
    Unauthorized { expected: Address, actual: Address },
    #[error("caller {caller} is neither validator {validator} nor its operator")]
    NotValidatorOrOperator { validator: Address, caller: Address },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SystemError {
    #[error("payload encoding failed: {0}")]
    EncodeError(String),
    #[error("no stake credit exists at {0}")]
    StakeCreditNotFound(Address),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationError {
    #[error("{0}")]
    StakeConfigError(StakeConfigError),

    #[error("{0}")]
    StakeCreditError(StakeCreditError),

    #[error("{0}")]
    ValidatorManagerError(ValidatorManagerError),

    #[error("{0}")]
    EpochManagerError(EpochManagerError),

    #[error("{0}")]
    CrossChainError(CrossChainError),

    #[error("{0}")]
    GenesisError(GenesisError),
}

impl From<AuthError> for RuntimeError {
    fn from(error: AuthError) -> Self {
        RuntimeError::AuthError(error)
    }
}

impl From<SystemError> for RuntimeError {
    fn from(error: SystemError) -> Self {
        RuntimeError::SystemError(error)
    }
}

impl From<ApplicationError> for RuntimeError {
    fn from(error: ApplicationError) -> Self {
        RuntimeError::ApplicationError(error)
    }
}
