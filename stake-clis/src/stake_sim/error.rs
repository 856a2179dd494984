use stake_engine::prelude::*;
use std::io;

/// Represents a stake-sim error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IOError(io::Error),

    #[error("{0}")]
    ModelError(ModelError),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error("{0}")]
    InvalidConfig(StakeConfigError),

    #[error("payload encoding failed: {0:?}")]
    EncodeError(sbor::EncodeError),

    #[error("transaction failed: {0}")]
    TransactionFailed(RuntimeError),

    #[error("ledger read failed: {0}")]
    LedgerReadError(RuntimeError),
}
