use super::StakeConfigError;
use crate::errors::RuntimeError;
use crate::system::{StakingEvent, SystemApi};
use crate::types::*;
use sbor::{basic_decode, BasicDecode};

pub struct StakeConfigBlueprint;

impl StakeConfigBlueprint {
    /// Governance entry point. `value` is the SBOR-encoded new value: `u128` for
    /// `minValidatorStake`, `u64` for every other parameter.
    pub fn update_param<Y>(key: &str, value: &[u8], api: &mut Y) -> Result<(), RuntimeError>
    where
        Y: SystemApi,
    {
        api.require_caller(GOVERNANCE)?;

        let mut config = api.state().config.clone();
        match key {
            PARAM_MIN_VALIDATOR_STAKE => config.min_validator_stake = decode(key, value)?,
            PARAM_VOTING_POWER_INCREASE_LIMIT => {
                config.voting_power_increase_limit = decode(key, value)?
            }
            PARAM_MAX_COMMISSION_RATE => config.max_commission_rate = decode(key, value)?,
            PARAM_UNBONDING_EPOCHS => config.unbonding_epochs = decode(key, value)?,
            PARAM_EPOCH_INTERVAL_MICROS => config.epoch_interval_micros = decode(key, value)?,
            _ => {
                return Err(StakeConfigError::UnknownParam {
                    key: key.to_owned(),
                    value: value.to_vec(),
                }
                .into())
            }
        }

        if config.validate().is_err() {
            return Err(invalid_value(key, value).into());
        }

        info!(key, "stake config updated");
        api.state_mut().config = config;
        api.emit_event(StakingEvent::ConfigUpdated {
            key: key.to_owned(),
        });

        Ok(())
    }
}

fn decode<T: BasicDecode>(key: &str, value: &[u8]) -> Result<T, StakeConfigError> {
    basic_decode(value).map_err(|_| invalid_value(key, value))
}

fn invalid_value(key: &str, value: &[u8]) -> StakeConfigError {
    StakeConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_vec(),
    }
}
