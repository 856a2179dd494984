use super::{LedgerState, StagedTransaction, StakingEvent};
use crate::blueprints::cross_chain::CrossChainEventProcessorBlueprint;
use crate::blueprints::epoch_manager::EpochManagerBlueprint;
use crate::blueprints::genesis::GenesisBlueprint;
use crate::blueprints::stake_config::{StakeConfigBlueprint, StakeConfigError};
use crate::blueprints::stake_credit::{PendingWithdrawal, StakeCreditBlueprint, StakeCreditSubstate};
use crate::blueprints::validator_manager::ValidatorManagerBlueprint;
use crate::crypto::SignatureVerifier;
use crate::errors::RuntimeError;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome<T> {
    Success(T),
    Failure(RuntimeError),
}

/// The result of one transaction together with the events it committed. A failed transaction
/// commits no events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt<T> {
    pub outcome: TransactionOutcome<T>,
    pub events: Vec<StakingEvent>,
}

impl<T: std::fmt::Debug> TransactionReceipt<T> {
    pub fn is_commit_success(&self) -> bool {
        matches!(self.outcome, TransactionOutcome::Success(_))
    }

    pub fn expect_commit_success(&self) -> &T {
        match &self.outcome {
            TransactionOutcome::Success(output) => output,
            TransactionOutcome::Failure(err) => panic!("Expected success but was failure: {:?}", err),
        }
    }

    pub fn expect_commit_failure(&self) -> &RuntimeError {
        match &self.outcome {
            TransactionOutcome::Success(output) => {
                panic!("Expected failure but was success: {:?}", output)
            }
            TransactionOutcome::Failure(err) => err,
        }
    }

    pub fn expect_specific_failure<F>(&self, f: F)
    where
        F: FnOnce(&RuntimeError) -> bool,
    {
        let err = self.expect_commit_failure();
        if !f(err) {
            panic!(
                "Expected specific failure but was different error:\n{:?}",
                err
            );
        }
    }

    pub fn into_result(self) -> Result<T, RuntimeError> {
        match self.outcome {
            TransactionOutcome::Success(output) => Ok(output),
            TransactionOutcome::Failure(err) => Err(err),
        }
    }
}

/// Owns the committed staking state and runs every operation as an all-or-nothing transaction.
pub struct StakingLedger {
    state: LedgerState,
    events: Vec<StakingEvent>,
    verifier: Box<dyn SignatureVerifier>,
    chain_id: u64,
}

impl StakingLedger {
    pub fn new(
        config: StakeConfig,
        chain_id: u64,
        verifier: Box<dyn SignatureVerifier>,
    ) -> Result<Self, StakeConfigError> {
        config.validate().map_err(StakeConfigError::InvalidConfig)?;
        Ok(Self {
            state: LedgerState::new(config),
            events: Vec::new(),
            verifier,
            chain_id,
        })
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Every event committed so far, oldest first.
    pub fn events(&self) -> &[StakingEvent] {
        &self.events
    }

    /// Runs `f` against a staged copy of the state as `caller`. The copy and its events are
    /// committed only if `f` returns `Ok`.
    pub fn execute<T, F>(&mut self, caller: Address, f: F) -> TransactionReceipt<T>
    where
        F: FnOnce(&mut StagedTransaction) -> Result<T, RuntimeError>,
    {
        let mut transaction =
            StagedTransaction::new(caller, self.chain_id, self.state.clone(), &*self.verifier);
        match f(&mut transaction) {
            Ok(output) => {
                let (state, events) = transaction.into_parts();
                self.state = state;
                self.events.extend(events.iter().cloned());
                TransactionReceipt {
                    outcome: TransactionOutcome::Success(output),
                    events,
                }
            }
            Err(err) => {
                warn!(%caller, error = %err, "transaction aborted");
                TransactionReceipt {
                    outcome: TransactionOutcome::Failure(err),
                    events: Vec::new(),
                }
            }
        }
    }

    //==================
    // system entry points
    //==================

    pub fn initialize_genesis(
        &mut self,
        caller: Address,
        validator_set: &GenesisValidatorSet,
    ) -> TransactionReceipt<()> {
        self.execute(caller, |api| GenesisBlueprint::initialize(validator_set, api))
    }

    pub fn update_global_time(&mut self, caller: Address, now_micros: u64) -> TransactionReceipt<()> {
        self.execute(caller, |api| {
            EpochManagerBlueprint::update_global_time(now_micros, api)
        })
    }

    pub fn trigger_epoch_transition(&mut self, caller: Address) -> TransactionReceipt<Epoch> {
        self.execute(caller, |api| {
            EpochManagerBlueprint::trigger_epoch_transition(api)
        })
    }

    pub fn process_cross_chain_batch(
        &mut self,
        caller: Address,
        groups: &[ProviderJwks],
        params: &[CrossChainParams],
    ) -> TransactionReceipt<Vec<CrossChainEventOutcome>> {
        self.execute(caller, |api| {
            CrossChainEventProcessorBlueprint::process_batch(groups, params, api)
        })
    }

    pub fn update_param(
        &mut self,
        caller: Address,
        key: &str,
        value: &[u8],
    ) -> TransactionReceipt<()> {
        self.execute(caller, |api| StakeConfigBlueprint::update_param(key, value, api))
    }

    pub fn force_leave_validator_set(
        &mut self,
        caller: Address,
        validator: Address,
    ) -> TransactionReceipt<()> {
        self.execute(caller, |api| {
            ValidatorManagerBlueprint::force_leave_validator_set(validator, api)
        })
    }

    //==================
    // validator entry points
    //==================

    pub fn register_validator(
        &mut self,
        caller: Address,
        params: ValidatorRegistrationParams,
        initial_stake: u128,
    ) -> TransactionReceipt<Address> {
        self.execute(caller, |api| {
            ValidatorManagerBlueprint::register_validator(params, initial_stake, api)
        })
    }

    pub fn join_validator_set(&mut self, caller: Address, validator: Address) -> TransactionReceipt<()> {
        self.execute(caller, |api| {
            ValidatorManagerBlueprint::join_validator_set(validator, api)
        })
    }

    pub fn leave_validator_set(
        &mut self,
        caller: Address,
        validator: Address,
    ) -> TransactionReceipt<()> {
        self.execute(caller, |api| {
            ValidatorManagerBlueprint::leave_validator_set(validator, api)
        })
    }

    pub fn update_commission_rate(
        &mut self,
        caller: Address,
        validator: Address,
        new_rate: u64,
    ) -> TransactionReceipt<()> {
        self.execute(caller, |api| {
            ValidatorManagerBlueprint::update_commission_rate(validator, new_rate, api)
        })
    }

    pub fn update_beneficiary(
        &mut self,
        caller: Address,
        validator: Address,
        beneficiary: Address,
    ) -> TransactionReceipt<()> {
        self.execute(caller, |api| {
            ValidatorManagerBlueprint::update_beneficiary(validator, beneficiary, api)
        })
    }

    //==================
    // delegator entry points
    //==================

    pub fn deposit(
        &mut self,
        caller: Address,
        validator: Address,
        amount: u128,
    ) -> TransactionReceipt<u128> {
        self.execute(caller, |api| {
            StakeCreditBlueprint::deposit(validator, amount, api)
        })
    }

    pub fn unlock(
        &mut self,
        caller: Address,
        validator: Address,
        shares: u128,
    ) -> TransactionReceipt<PendingWithdrawal> {
        self.execute(caller, |api| StakeCreditBlueprint::unlock(validator, shares, api))
    }

    pub fn claim(&mut self, caller: Address, validator: Address) -> TransactionReceipt<u128> {
        self.execute(caller, |api| StakeCreditBlueprint::claim(validator, api))
    }

    //==================
    // reads
    //==================

    pub fn validator_set(&self) -> Result<ValidatorSetView, RuntimeError> {
        ValidatorManagerBlueprint::validator_set(&self.state)
    }

    pub fn current_epoch_info(&self) -> EpochInfo {
        EpochManagerBlueprint::current_epoch_info(&self.state)
    }

    pub fn can_trigger_epoch_transition(&self) -> bool {
        EpochManagerBlueprint::can_trigger_epoch_transition(&self.state)
    }

    pub fn validator_info(&self, validator: &Address) -> Option<ValidatorInfo> {
        ValidatorManagerBlueprint::validator_info(&self.state, validator)
    }

    pub fn validator_status(&self, validator: &Address) -> ValidatorStatus {
        ValidatorManagerBlueprint::validator_status(&self.state, validator)
    }

    /// The credit of a registered validator.
    pub fn stake_credit(&self, validator: &Address) -> Option<&StakeCreditSubstate> {
        self.state
            .stake_credits
            .get(&StakeCreditBlueprint::address_of(validator))
    }

    pub fn is_event_processed(&self, identifier: &Hash) -> bool {
        CrossChainEventProcessorBlueprint::is_event_processed(&self.state, identifier)
    }
}
