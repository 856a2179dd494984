use crate::constants::{COMMISSION_DENOMINATOR, VOTING_POWER_INCREASE_DENOMINATOR};
use bnum::types::U256;
use sbor::Sbor;

pub const PARAM_MIN_VALIDATOR_STAKE: &str = "minValidatorStake";
pub const PARAM_VOTING_POWER_INCREASE_LIMIT: &str = "votingPowerIncreaseLimit";
pub const PARAM_MAX_COMMISSION_RATE: &str = "maxCommissionRate";
pub const PARAM_UNBONDING_EPOCHS: &str = "unbondingEpochs";
pub const PARAM_EPOCH_INTERVAL_MICROS: &str = "epochIntervalMicros";

/// Global staking parameters. Immutable except through governance.
///
/// There is deliberately no `Default`: the unbonding delay and epoch interval are deployment
/// decisions and must be supplied explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Sbor)]
pub struct StakeConfig {
    /// Minimum next-epoch voting power a validator needs to join the active set.
    pub min_validator_stake: u128,
    /// Maximum growth of voting power admitted per epoch, as a percentage of the current total.
    pub voting_power_increase_limit: u64,
    /// Upper bound for any validator's `max_rate`, in basis points.
    pub max_commission_rate: u64,
    /// Number of epochs an unlocked stake waits before it can be claimed.
    pub unbonding_epochs: u64,
    /// Minimum wall-clock time between two epoch transitions, in microseconds.
    pub epoch_interval_micros: u64,
}

impl StakeConfig {
    pub fn new(
        min_validator_stake: u128,
        voting_power_increase_limit: u64,
        max_commission_rate: u64,
        unbonding_epochs: u64,
        epoch_interval_micros: u64,
    ) -> Self {
        Self {
            min_validator_stake,
            voting_power_increase_limit,
            max_commission_rate,
            unbonding_epochs,
            epoch_interval_micros,
        }
    }

    pub fn test_default() -> Self {
        Self {
            min_validator_stake: 100,
            voting_power_increase_limit: 20,
            max_commission_rate: 5_000,
            unbonding_epochs: 1,
            epoch_interval_micros: 1,
        }
    }

    pub fn with_min_validator_stake(mut self, new_value: u128) -> Self {
        self.min_validator_stake = new_value;
        self
    }

    pub fn with_voting_power_increase_limit(mut self, new_value: u64) -> Self {
        self.voting_power_increase_limit = new_value;
        self
    }

    pub fn with_max_commission_rate(mut self, new_value: u64) -> Self {
        self.max_commission_rate = new_value;
        self
    }

    pub fn with_unbonding_epochs(mut self, new_value: u64) -> Self {
        self.unbonding_epochs = new_value;
        self
    }

    pub fn with_epoch_interval_micros(mut self, new_value: u64) -> Self {
        self.epoch_interval_micros = new_value;
        self
    }

    /// Checks every parameter against its admissible range, returning the name of the first
    /// parameter that is out of range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.min_validator_stake == 0 {
            return Err(PARAM_MIN_VALIDATOR_STAKE);
        }
        if self.voting_power_increase_limit == 0
            || u128::from(self.voting_power_increase_limit) > VOTING_POWER_INCREASE_DENOMINATOR
        {
            return Err(PARAM_VOTING_POWER_INCREASE_LIMIT);
        }
        if self.max_commission_rate > COMMISSION_DENOMINATOR {
            return Err(PARAM_MAX_COMMISSION_RATE);
        }
        if self.epoch_interval_micros == 0 {
            return Err(PARAM_EPOCH_INTERVAL_MICROS);
        }
        Ok(())
    }

    /// The largest amount of voting power that may be pending activation, given the total
    /// voting power of the current active set.
    pub fn max_pending_voting_power(&self, total_voting_power: u128) -> Option<u128> {
        let scaled = U256::from(total_voting_power) * U256::from(self.voting_power_increase_limit);
        u128::try_from(scaled / U256::from(VOTING_POWER_INCREASE_DENOMINATOR)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(StakeConfig::test_default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_parameters_are_named() {
        let config = StakeConfig::test_default();
        assert_eq!(
            config.clone().with_voting_power_increase_limit(0).validate(),
            Err(PARAM_VOTING_POWER_INCREASE_LIMIT)
        );
        assert_eq!(
            config
                .clone()
                .with_voting_power_increase_limit(101)
                .validate(),
            Err(PARAM_VOTING_POWER_INCREASE_LIMIT)
        );
        assert_eq!(
            config.clone().with_max_commission_rate(10_001).validate(),
            Err(PARAM_MAX_COMMISSION_RATE)
        );
        assert_eq!(
            config.clone().with_min_validator_stake(0).validate(),
            Err(PARAM_MIN_VALIDATOR_STAKE)
        );
        assert_eq!(
            config.with_epoch_interval_micros(0).validate(),
            Err(PARAM_EPOCH_INTERVAL_MICROS)
        );
    }

    #[test]
    fn pending_power_cap_uses_floor_division() {
        let config = StakeConfig::test_default().with_voting_power_increase_limit(10);
        assert_eq!(config.max_pending_voting_power(1000), Some(100));
        assert_eq!(config.max_pending_voting_power(1009), Some(100));
        assert_eq!(config.max_pending_voting_power(0), Some(0));
    }

    #[test]
    fn pending_power_cap_holds_for_totals_near_the_u128_limit() {
        let config = StakeConfig::test_default().with_voting_power_increase_limit(100);
        assert_eq!(config.max_pending_voting_power(u128::MAX), Some(u128::MAX));

        let config = StakeConfig::test_default().with_voting_power_increase_limit(20);
        assert_eq!(
            config.max_pending_voting_power(u128::MAX),
            Some(u128::MAX / 5)
        );
    }
}
