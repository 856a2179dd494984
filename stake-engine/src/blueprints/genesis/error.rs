use crate::errors::{ApplicationError, RuntimeError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenesisError {
    #[error("genesis has already been initialized")]
    GenesisAlreadyInitialized,
    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),
}

impl From<GenesisError> for RuntimeError {
    fn from(error: GenesisError) -> Self {
        Self::ApplicationError(ApplicationError::GenesisError(error))
    }
}
