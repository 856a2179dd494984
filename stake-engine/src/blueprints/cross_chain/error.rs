use crate::errors::{ApplicationError, RuntimeError};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrossChainError {
    #[error("batch has {groups} groups but {params} params")]
    BatchLengthMismatch { groups: usize, params: usize },
    #[error("group {index}: params issuer {actual:?} does not match group issuer {expected:?}")]
    IssuerMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
    #[error("group {index}: params payload does not match the observed entry")]
    PayloadMismatch { index: usize },
    #[error("group {index}: undecodable payload: {reason}")]
    PayloadDecodeFailed { index: usize, reason: String },
    #[error("group {index}: params target {actual} does not match event target {expected}")]
    TargetMismatch {
        index: usize,
        expected: Address,
        actual: Address,
    },
    #[error("group {index}: minted {minted} shares, expected at least {expected}")]
    InsufficientSharesMinted {
        index: usize,
        expected: u128,
        minted: u128,
    },
}

impl From<CrossChainError> for RuntimeError {
    fn from(error: CrossChainError) -> Self {
        Self::ApplicationError(ApplicationError::CrossChainError(error))
    }
}
