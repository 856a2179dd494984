use crate::errors::{ApplicationError, RuntimeError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StakeConfigError {
    #[error("unknown parameter {key} (value 0x{})", hex::encode(.value))]
    UnknownParam { key: String, value: Vec<u8> },
    #[error("invalid value for {key}: 0x{}", hex::encode(.value))]
    InvalidValue { key: String, value: Vec<u8> },
    #[error("invalid configuration: {0} is out of range")]
    InvalidConfig(&'static str),
}

impl From<StakeConfigError> for RuntimeError {
    fn from(error: StakeConfigError) -> Self {
        Self::ApplicationError(ApplicationError::StakeConfigError(error))
    }
}
