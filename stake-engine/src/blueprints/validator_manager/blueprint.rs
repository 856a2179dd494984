use super::ValidatorManagerError;
use crate::blueprints::stake_credit::{StakeCreditBlueprint, StakeCreditError};
use crate::crypto::vote_address_proof_message;
use crate::errors::{AuthError, RuntimeError};
use crate::system::{LedgerState, StakingEvent, SystemApi};
use crate::types::*;
use itertools::Itertools;

pub struct ValidatorManagerBlueprint;

impl ValidatorManagerBlueprint {
    /// Registers the caller as a validator, funded with `initial_stake`. The new validator is
    /// `INACTIVE` until it joins the set and an epoch boundary passes.
    pub fn register_validator<Y>(
        params: ValidatorRegistrationParams,
        initial_stake: u128,
        api: &mut Y,
    ) -> Result<Address, RuntimeError>
    where
        Y: SystemApi,
    {
        let validator = api.caller();
        Self::register(validator, params, initial_stake, api)
    }

    pub(crate) fn register<Y>(
        validator: Address,
        params: ValidatorRegistrationParams,
        initial_stake: u128,
        api: &mut Y,
    ) -> Result<Address, RuntimeError>
    where
        Y: SystemApi,
    {
        let state = api.state();
        let manager = &state.validator_manager;
        if manager.validators.contains_key(&validator) {
            return Err(ValidatorManagerError::AlreadyRegistered(validator).into());
        }
        if !is_valid_moniker(&params.moniker) {
            return Err(ValidatorManagerError::InvalidMoniker(params.moniker).into());
        }
        if !params
            .commission
            .is_within_bounds(state.config.max_commission_rate)
        {
            return Err(ValidatorManagerError::InvalidCommission(params.commission).into());
        }
        if params.beneficiary.is_zero() {
            return Err(ValidatorManagerError::InvalidBeneficiary(params.beneficiary).into());
        }
        manager.check_uniqueness(
            &validator,
            &params.operator,
            &params.moniker,
            &params.vote_address,
            &params.consensus_public_key,
        )?;

        let message =
            vote_address_proof_message(&params.operator, &params.vote_address, api.chain_id());
        let code = api.verify_signature(message.as_ref(), &params.bls_proof, &params.vote_address);
        if code != VERIFICATION_SUCCESS {
            return Err(ValidatorManagerError::InvalidVoteAddress.into());
        }

        let stake_credit = StakeCreditBlueprint::create(validator, initial_stake, api)?;
        let registration_epoch = api.state().current_epoch();

        info!(
            %validator,
            operator = %params.operator,
            moniker = %params.moniker,
            initial_stake,
            "validator registered"
        );
        api.emit_event(StakingEvent::ValidatorRegistered {
            validator,
            operator: params.operator,
            stake_credit,
            initial_stake,
        });
        api.state_mut().validator_manager.insert(
            validator,
            ValidatorInfo {
                status: ValidatorStatus::Inactive,
                operator: params.operator,
                beneficiary: params.beneficiary,
                vote_address: params.vote_address,
                consensus_public_key: params.consensus_public_key,
                moniker: params.moniker,
                commission: params.commission,
                stake_credit,
                validator_network_addresses: params.validator_network_addresses,
                fullnode_network_addresses: params.fullnode_network_addresses,
                registration_epoch,
                last_commission_update_epoch: None,
            },
        );

        Ok(validator)
    }

    /// Requests `INACTIVE -> PENDING_ACTIVE`. Takes effect at the next epoch boundary.
    pub fn join_validator_set<Y>(validator: Address, api: &mut Y) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        Self::require_validator_or_operator(&validator, api)?;

        let state = api.state();
        Self::require_status(state, &validator, ValidatorStatus::Inactive)?;

        let voting_power = StakeCreditBlueprint::next_epoch_voting_power(state, &validator)?;
        if voting_power < state.config.min_validator_stake {
            return Err(ValidatorManagerError::InsufficientStake {
                required: state.config.min_validator_stake,
                actual: voting_power,
            }
            .into());
        }
        Self::check_voting_power_increase(state, voting_power)?;

        let manager = &mut api.state_mut().validator_manager;
        manager.get_mut(&validator)?.status = ValidatorStatus::PendingActive;
        manager.pending_active.insert(validator);

        info!(%validator, voting_power, "validator requested to join the active set");
        api.emit_event(StakingEvent::ValidatorJoinRequested {
            validator,
            voting_power,
        });

        Ok(())
    }

    /// The pending voting power, including the candidate's, may not exceed
    /// `total_voting_power * voting_power_increase_limit / 100` where the total is the one
    /// committed at the last epoch boundary. With no committed voting power there is nothing to
    /// bound growth against and the check passes.
    fn check_voting_power_increase(state: &LedgerState, increase: u128) -> Result<(), RuntimeError> {
        let total_voting_power = state.validator_manager.total_voting_power;
        if total_voting_power == 0 {
            return Ok(());
        }

        let mut pending = increase;
        for validator in &state.validator_manager.pending_active {
            let voting_power = StakeCreditBlueprint::next_epoch_voting_power(state, validator)?;
            pending = pending
                .checked_add(voting_power)
                .ok_or(StakeCreditError::ArithmeticOverflow)?;
        }

        let limit = state
            .config
            .max_pending_voting_power(total_voting_power)
            .ok_or(StakeCreditError::ArithmeticOverflow)?;
        if pending > limit {
            return Err(
                ValidatorManagerError::VotingPowerIncreaseExceedsLimit { pending, limit }.into(),
            );
        }

        Ok(())
    }

    /// Requests `ACTIVE -> PENDING_INACTIVE`.
    pub fn leave_validator_set<Y>(validator: Address, api: &mut Y) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        Self::require_validator_or_operator(&validator, api)?;
        Self::request_leave(validator, false, api)
    }

    /// Governance variant of [`Self::leave_validator_set`].
    pub fn force_leave_validator_set<Y>(
        validator: Address,
        api: &mut Y,
    ) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        api.require_caller(GOVERNANCE)?;
        Self::request_leave(validator, true, api)
    }

    fn request_leave<Y>(validator: Address, forced: bool, api: &mut Y) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        Self::require_status(api.state(), &validator, ValidatorStatus::Active)?;

        let manager = &mut api.state_mut().validator_manager;
        if manager.active.len() <= 1 {
            return Err(ValidatorManagerError::CannotRemoveLastActiveValidator.into());
        }
        manager.active.remove(&validator);
        manager.pending_inactive.insert(validator);
        manager.get_mut(&validator)?.status = ValidatorStatus::PendingInactive;

        info!(%validator, forced, "validator requested to leave the active set");
        api.emit_event(StakingEvent::ValidatorLeaveRequested { validator, forced });

        Ok(())
    }

    /// Commits every pending transition and re-weighs the active set. Only the epoch manager
    /// calls this, once per epoch.
    pub(crate) fn on_new_epoch<Y>(api: &mut Y) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        let manager = &mut api.state_mut().validator_manager;
        let activated = std::mem::take(&mut manager.pending_active);
        let deactivated = std::mem::take(&mut manager.pending_inactive);
        for validator in &activated {
            manager.get_mut(validator)?.status = ValidatorStatus::Active;
            manager.active.insert(*validator, 0);
        }
        for validator in &deactivated {
            manager.get_mut(validator)?.status = ValidatorStatus::Inactive;
        }

        let state = api.state();
        let voting_powers = state
            .validator_manager
            .active
            .keys()
            .map(|validator| {
                StakeCreditBlueprint::next_epoch_voting_power(state, validator)
                    .map(|voting_power| (*validator, voting_power))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        let total_voting_power = voting_powers
            .values()
            .try_fold(0u128, |total, voting_power| total.checked_add(*voting_power))
            .ok_or(StakeCreditError::ArithmeticOverflow)?;

        let manager = &mut api.state_mut().validator_manager;
        manager.active = voting_powers;
        manager.total_voting_power = total_voting_power;

        for validator in activated {
            api.emit_event(StakingEvent::ValidatorStatusChanged {
                validator,
                from: ValidatorStatus::PendingActive,
                to: ValidatorStatus::Active,
            });
        }
        for validator in deactivated {
            api.emit_event(StakingEvent::ValidatorStatusChanged {
                validator,
                from: ValidatorStatus::PendingInactive,
                to: ValidatorStatus::Inactive,
            });
        }

        Ok(())
    }

    /// Changes the commission rate by at most `max_change_rate`, never above `max_rate`, at most
    /// once per epoch.
    pub fn update_commission_rate<Y>(
        validator: Address,
        new_rate: u64,
        api: &mut Y,
    ) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        Self::require_validator_or_operator(&validator, api)?;

        let current_epoch = api.state().current_epoch();
        let info = api.state_mut().validator_manager.get_mut(&validator)?;
        if info.last_commission_update_epoch == Some(current_epoch) {
            return Err(ValidatorManagerError::CommissionUpdateTooFrequent(validator).into());
        }
        let old_rate = info.commission.rate;
        if new_rate > info.commission.max_rate
            || new_rate.abs_diff(old_rate) > info.commission.max_change_rate
        {
            return Err(ValidatorManagerError::InvalidCommission(Commission {
                rate: new_rate,
                ..info.commission
            })
            .into());
        }
        info.commission.rate = new_rate;
        info.last_commission_update_epoch = Some(current_epoch);

        info!(%validator, old_rate, new_rate, "commission rate updated");
        api.emit_event(StakingEvent::CommissionRateUpdated {
            validator,
            old_rate,
            new_rate,
        });

        Ok(())
    }

    pub fn update_beneficiary<Y>(
        validator: Address,
        beneficiary: Address,
        api: &mut Y,
    ) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        Self::require_validator_or_operator(&validator, api)?;
        if beneficiary.is_zero() {
            return Err(ValidatorManagerError::InvalidBeneficiary(beneficiary).into());
        }

        api.state_mut()
            .validator_manager
            .get_mut(&validator)?
            .beneficiary = beneficiary;

        info!(%validator, %beneficiary, "beneficiary updated");
        api.emit_event(StakingEvent::BeneficiaryUpdated {
            validator,
            beneficiary,
        });

        Ok(())
    }

    pub fn validator_set(state: &LedgerState) -> Result<ValidatorSetView, RuntimeError> {
        let manager = &state.validator_manager;
        let pending = |validators: &BTreeSet<Address>| {
            validators
                .iter()
                .map(|validator| {
                    Ok(ValidatorSetEntry {
                        validator: *validator,
                        voting_power: StakeCreditBlueprint::next_epoch_voting_power(
                            state, validator,
                        )?,
                    })
                })
                .collect::<Result<Vec<_>, RuntimeError>>()
        };

        Ok(ValidatorSetView {
            active: manager
                .active
                .iter()
                .map(|(validator, voting_power)| ValidatorSetEntry {
                    validator: *validator,
                    voting_power: *voting_power,
                })
                .collect_vec(),
            pending_active: pending(&manager.pending_active)?,
            pending_inactive: pending(&manager.pending_inactive)?,
            total_voting_power: manager.total_voting_power,
        })
    }

    pub fn validator_info(state: &LedgerState, validator: &Address) -> Option<ValidatorInfo> {
        state.validator_manager.validators.get(validator).cloned()
    }

    pub fn validator_status(state: &LedgerState, validator: &Address) -> ValidatorStatus {
        state.validator_manager.status(validator)
    }

    fn require_status(
        state: &LedgerState,
        validator: &Address,
        expected: ValidatorStatus,
    ) -> Result<(), RuntimeError> {
        let actual = state.validator_manager.get(validator)?.status;
        if actual != expected {
            return Err(ValidatorManagerError::InvalidValidatorStatus {
                validator: *validator,
                expected,
                actual,
            }
            .into());
        }
        Ok(())
    }

    fn require_validator_or_operator<Y>(validator: &Address, api: &Y) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        let caller = api.caller();
        let info = api.state().validator_manager.get(validator)?;
        if caller != *validator && caller != info.operator {
            return Err(AuthError::NotValidatorOrOperator {
                validator: *validator,
                caller,
            }
            .into());
        }
        Ok(())
    }
}
