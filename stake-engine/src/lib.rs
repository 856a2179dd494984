//! The validator staking state machine.
//!
//! All state lives in a [`system::LedgerState`] owned by a [`system::StakingLedger`]. Every
//! public operation runs as a staged transaction: blueprints mutate a copy of the state through
//! the [`system::SystemApi`] and the copy replaces the committed state only if the whole
//! operation succeeds.

pub mod blueprints;
pub mod crypto;
pub mod errors;
pub mod system;
pub mod types;

pub mod prelude {
    pub use crate::blueprints::cross_chain::*;
    pub use crate::blueprints::epoch_manager::*;
    pub use crate::blueprints::genesis::*;
    pub use crate::blueprints::stake_config::*;
    pub use crate::blueprints::stake_credit::*;
    pub use crate::blueprints::validator_manager::*;
    pub use crate::crypto::*;
    pub use crate::errors::*;
    pub use crate::system::*;
    pub use stake_engine_interface::prelude::*;
}
