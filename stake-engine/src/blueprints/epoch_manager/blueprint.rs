use super::EpochManagerError;
use crate::blueprints::validator_manager::ValidatorManagerBlueprint;
use crate::errors::RuntimeError;
use crate::system::{LedgerState, StakingEvent, SystemApi};
use crate::types::*;

pub struct EpochManagerBlueprint;

impl EpochManagerBlueprint {
    /// Advances the ledger clock. Called by the block prologue.
    pub fn update_global_time<Y>(now_micros: u64, api: &mut Y) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        api.require_caller(SYSTEM_CALLER)?;

        let epoch_manager = &mut api.state_mut().epoch_manager;
        if now_micros < epoch_manager.current_time_micros {
            return Err(EpochManagerError::TimestampDecreased {
                current_micros: epoch_manager.current_time_micros,
                proposed_micros: now_micros,
            }
            .into());
        }
        epoch_manager.current_time_micros = now_micros;

        Ok(())
    }

    pub fn current_epoch_info(state: &LedgerState) -> EpochInfo {
        EpochInfo {
            epoch: state.epoch_manager.epoch,
            last_transition_time_micros: state.epoch_manager.last_transition_time_micros,
            epoch_interval_micros: state.config.epoch_interval_micros,
        }
    }

    /// The transition gate: closed right after each transition, open again once a full epoch
    /// interval of ledger time has passed.
    pub fn can_trigger_epoch_transition(state: &LedgerState) -> bool {
        Self::current_epoch_info(state).is_transition_due(state.epoch_manager.current_time_micros)
    }

    /// Moves to the next epoch and commits every pending validator transition in this one call.
    pub fn trigger_epoch_transition<Y>(api: &mut Y) -> Result<Epoch, RuntimeError>
    where
        Y: SystemApi,
    {
        api.require_caller(SYSTEM_CALLER)?;

        let state = api.state();
        if !Self::can_trigger_epoch_transition(state) {
            return Err(EpochManagerError::NotReady {
                now_micros: state.epoch_manager.current_time_micros,
                next_transition_micros: Self::current_epoch_info(state)
                    .next_transition_time_micros(),
            }
            .into());
        }
        let next_epoch = state
            .epoch_manager
            .epoch
            .next()
            .ok_or(EpochManagerError::EpochOverflow)?;

        let epoch_manager = &mut api.state_mut().epoch_manager;
        epoch_manager.epoch = next_epoch;
        epoch_manager.last_transition_time_micros = epoch_manager.current_time_micros;

        ValidatorManagerBlueprint::on_new_epoch(api)?;

        let manager = &api.state().validator_manager;
        let active_validator_count = manager.active.len();
        let total_voting_power = manager.total_voting_power;
        info!(
            epoch = %next_epoch,
            active_validator_count,
            total_voting_power,
            "epoch changed"
        );
        api.emit_event(StakingEvent::EpochChanged {
            epoch: next_epoch,
            active_validator_count,
            total_voting_power,
        });

        Ok(next_epoch)
    }
}
