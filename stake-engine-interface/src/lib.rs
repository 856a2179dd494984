/// Staking engine constants: system identities and fixed denominators.
pub mod constants;
/// Primitive types: addresses, epochs, hashes and BLS key material.
pub mod types;
/// Per-blueprint data models: config, validator records, epoch info and cross-chain payloads.
pub mod blueprints;
/// JSON file models consumed by tooling (genesis config, JWK batches).
pub mod models;

/// Each crate has its own prelude; downstream crates pull in this one and avoid a long list of
/// imports for the shared data model.
pub mod prelude {
    pub use super::blueprints::cross_chain::*;
    pub use super::blueprints::epoch_manager::*;
    pub use super::blueprints::stake_config::*;
    pub use super::blueprints::validator_manager::*;
    pub use super::constants::*;
    pub use super::models::*;
    pub use super::types::*;
}
