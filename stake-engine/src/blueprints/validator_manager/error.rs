use crate::errors::{ApplicationError, RuntimeError};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorManagerError {
    #[error("validator {0} is already registered")]
    AlreadyRegistered(Address),
    #[error("validator {0} is not registered")]
    ValidatorNotRegistered(Address),
    #[error("vote address {0} is already in use")]
    DuplicateVoteAddress(Bls12381G1PublicKey),
    #[error("consensus public key 0x{} is already in use", hex::encode(.0))]
    DuplicateConsensusAddress(Vec<u8>),
    #[error("moniker {0} is already in use")]
    DuplicateMoniker(String),
    #[error("address {0} is already in use")]
    AddressAlreadyInUse(Address),
    #[error("invalid moniker {0:?}")]
    InvalidMoniker(String),
    #[error("invalid commission {0:?}")]
    InvalidCommission(Commission),
    #[error("vote address proof does not verify")]
    InvalidVoteAddress,
    #[error("invalid beneficiary {0}")]
    InvalidBeneficiary(Address),
    #[error("stake {actual} is below the minimum of {required}")]
    InsufficientStake { required: u128, actual: u128 },
    #[error("pending voting power {pending} would exceed the limit of {limit}")]
    VotingPowerIncreaseExceedsLimit { pending: u128, limit: u128 },
    #[error("cannot remove the last active validator")]
    CannotRemoveLastActiveValidator,
    #[error("validator {validator} is {actual}, expected {expected}")]
    InvalidValidatorStatus {
        validator: Address,
        expected: ValidatorStatus,
        actual: ValidatorStatus,
    },
    #[error("commission of {0} was already updated this epoch")]
    CommissionUpdateTooFrequent(Address),
}

impl From<ValidatorManagerError> for RuntimeError {
    fn from(error: ValidatorManagerError) -> Self {
        Self::ApplicationError(ApplicationError::ValidatorManagerError(error))
    }
}
