use super::GenesisError;
use crate::blueprints::stake_credit::{StakeCreditBlueprint, StakeCreditError};
use crate::blueprints::validator_manager::ValidatorManagerError;
use crate::errors::RuntimeError;
use crate::system::{StakingEvent, SystemApi};
use crate::types::*;

pub struct GenesisBlueprint;

impl GenesisBlueprint {
    /// Seeds the founding validator set straight into the active set. Runs once.
    ///
    /// Founding validators operate themselves, carry no BLS proof and start with a zero
    /// commission whose ceiling is the configured maximum.
    pub fn initialize<Y>(validator_set: &GenesisValidatorSet, api: &mut Y) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        api.require_caller(SYSTEM_CALLER)?;
        if api.state().genesis_initialized {
            return Err(GenesisError::GenesisAlreadyInitialized.into());
        }

        let validators = validator_set.zip().ok_or_else(|| {
            GenesisError::InvalidGenesis("validator arrays differ in length".to_owned())
        })?;
        if validators.is_empty() {
            return Err(GenesisError::InvalidGenesis("no validators".to_owned()).into());
        }

        let max_commission_rate = api.state().config.max_commission_rate;
        let epoch = api.state().current_epoch();
        let mut total_voting_power = 0u128;

        for genesis in validators {
            let validator = genesis.validator;
            if !is_valid_moniker(&genesis.moniker) {
                return Err(ValidatorManagerError::InvalidMoniker(genesis.moniker).into());
            }
            if genesis.beneficiary.is_zero() {
                return Err(ValidatorManagerError::InvalidBeneficiary(genesis.beneficiary).into());
            }
            api.state().validator_manager.check_uniqueness(
                &validator,
                &validator,
                &genesis.moniker,
                &genesis.vote_address,
                &genesis.consensus_public_key,
            )?;

            let stake_credit = StakeCreditBlueprint::create(validator, genesis.voting_power, api)?;
            total_voting_power = total_voting_power
                .checked_add(genesis.voting_power)
                .ok_or(StakeCreditError::ArithmeticOverflow)?;

            debug!(%validator, voting_power = genesis.voting_power, "genesis validator seeded");
            let manager = &mut api.state_mut().validator_manager;
            manager.insert(
                validator,
                ValidatorInfo {
                    status: ValidatorStatus::Active,
                    operator: validator,
                    beneficiary: genesis.beneficiary,
                    vote_address: genesis.vote_address,
                    consensus_public_key: genesis.consensus_public_key,
                    moniker: genesis.moniker,
                    commission: Commission::new(0, max_commission_rate, max_commission_rate),
                    stake_credit,
                    validator_network_addresses: Vec::new(),
                    fullnode_network_addresses: Vec::new(),
                    registration_epoch: epoch,
                    last_commission_update_epoch: None,
                },
            );
            manager.active.insert(validator, genesis.voting_power);
        }

        let state = api.state_mut();
        state.validator_manager.total_voting_power = total_voting_power;
        state.epoch_manager.last_transition_time_micros = state.epoch_manager.current_time_micros;
        state.genesis_initialized = true;

        let validator_count = validator_set.len();
        info!(validator_count, total_voting_power, "genesis initialized");
        api.emit_event(StakingEvent::GenesisInitialized {
            validator_count,
            total_voting_power,
        });

        Ok(())
    }
}
