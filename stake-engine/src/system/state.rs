use crate::blueprints::cross_chain::ProcessedEventsSubstate;
use crate::blueprints::epoch_manager::EpochManagerSubstate;
use crate::blueprints::stake_credit::StakeCreditSubstate;
use crate::blueprints::validator_manager::ValidatorManagerSubstate;
use crate::errors::{RuntimeError, SystemError};
use crate::types::*;

/// The complete staking state. Each blueprint owns exactly one part of it; no two blueprints
/// write the same substate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    pub config: StakeConfig,
    pub epoch_manager: EpochManagerSubstate,
    pub validator_manager: ValidatorManagerSubstate,
    /// Keyed by StakeCredit address.
    pub stake_credits: BTreeMap<Address, StakeCreditSubstate>,
    pub processed_events: ProcessedEventsSubstate,
    pub genesis_initialized: bool,
}

impl LedgerState {
    pub fn new(config: StakeConfig) -> Self {
        Self {
            config,
            epoch_manager: EpochManagerSubstate::default(),
            validator_manager: ValidatorManagerSubstate::default(),
            stake_credits: BTreeMap::new(),
            processed_events: ProcessedEventsSubstate::default(),
            genesis_initialized: false,
        }
    }

    pub fn current_epoch(&self) -> Epoch {
        self.epoch_manager.epoch
    }

    pub fn stake_credit(&self, address: &Address) -> Result<&StakeCreditSubstate, RuntimeError> {
        self.stake_credits
            .get(address)
            .ok_or_else(|| SystemError::StakeCreditNotFound(*address).into())
    }

    pub fn stake_credit_mut(
        &mut self,
        address: &Address,
    ) -> Result<&mut StakeCreditSubstate, RuntimeError> {
        self.stake_credits
            .get_mut(address)
            .ok_or_else(|| SystemError::StakeCreditNotFound(*address).into())
    }
}
