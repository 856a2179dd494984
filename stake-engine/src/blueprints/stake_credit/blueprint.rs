use super::{PendingWithdrawal, StakeCreditError, StakeCreditSubstate};
use crate::errors::RuntimeError;
use crate::system::{LedgerState, StakingEvent, SystemApi};
use crate::types::*;

pub struct StakeCreditBlueprint;

impl StakeCreditBlueprint {
    /// The deterministic address of a validator's credit.
    pub fn address_of(validator: &Address) -> Address {
        Address::derive(STAKE_CREDIT_ADDRESS_DOMAIN, validator.as_ref())
    }

    /// Deploys the credit of a newly registered validator, seeded with `initial_stake` owned by
    /// the validator itself.
    pub(crate) fn create<Y>(
        validator: Address,
        initial_stake: u128,
        api: &mut Y,
    ) -> Result<Address, RuntimeError>
    where
        Y: SystemApi,
    {
        let address = Self::address_of(&validator);
        let mut credit = StakeCreditSubstate::new(validator);
        if initial_stake > 0 {
            credit.deposit(validator, initial_stake)?;
        }
        api.state_mut().stake_credits.insert(address, credit);

        Ok(address)
    }

    /// Deposits `amount` into the validator's pool on behalf of the caller.
    pub fn deposit<Y>(validator: Address, amount: u128, api: &mut Y) -> Result<u128, RuntimeError>
    where
        Y: SystemApi,
    {
        let delegator = api.caller();
        Self::deposit_for(validator, delegator, amount, api)
    }

    pub(crate) fn deposit_for<Y>(
        validator: Address,
        delegator: Address,
        amount: u128,
        api: &mut Y,
    ) -> Result<u128, RuntimeError>
    where
        Y: SystemApi,
    {
        let credit_address = Self::credit_address(api.state(), &validator)?;
        let shares = api
            .state_mut()
            .stake_credit_mut(&credit_address)?
            .deposit(delegator, amount)?;

        debug!(%validator, %delegator, amount, shares, "stake deposited");
        api.emit_event(StakingEvent::StakeDeposited {
            validator,
            delegator,
            amount,
            shares,
        });

        Ok(shares)
    }

    /// Unlocks `shares` of the caller's stake. The resulting withdrawal matures
    /// `unbonding_epochs` after the current epoch.
    pub fn unlock<Y>(
        validator: Address,
        shares: u128,
        api: &mut Y,
    ) -> Result<PendingWithdrawal, RuntimeError>
    where
        Y: SystemApi,
    {
        let delegator = api.caller();
        let credit_address = Self::credit_address(api.state(), &validator)?;
        let maturity_epoch = api
            .state()
            .current_epoch()
            .after(api.state().config.unbonding_epochs)
            .ok_or(StakeCreditError::ArithmeticOverflow)?;

        let withdrawal = api
            .state_mut()
            .stake_credit_mut(&credit_address)?
            .unlock(delegator, shares, maturity_epoch)?;

        debug!(
            %validator,
            %delegator,
            shares,
            amount = withdrawal.amount,
            %maturity_epoch,
            "stake unlocked"
        );
        api.emit_event(StakingEvent::StakeUnlocked {
            validator,
            delegator,
            shares,
            amount: withdrawal.amount,
            maturity_epoch,
        });

        Ok(withdrawal)
    }

    /// Pays out the caller's matured withdrawals. Claiming with nothing matured returns zero.
    pub fn claim<Y>(validator: Address, api: &mut Y) -> Result<u128, RuntimeError>
    where
        Y: SystemApi,
    {
        let delegator = api.caller();
        let credit_address = Self::credit_address(api.state(), &validator)?;
        let current_epoch = api.state().current_epoch();

        let amount = api
            .state_mut()
            .stake_credit_mut(&credit_address)?
            .claim(delegator, current_epoch)?;

        if amount > 0 {
            debug!(%validator, %delegator, amount, "stake claimed");
            api.emit_event(StakingEvent::StakeClaimed {
                validator,
                delegator,
                amount,
            });
        }

        Ok(amount)
    }

    pub fn next_epoch_voting_power(
        state: &LedgerState,
        validator: &Address,
    ) -> Result<u128, RuntimeError> {
        let credit_address = Self::credit_address(state, validator)?;
        Ok(state.stake_credit(&credit_address)?.next_epoch_voting_power())
    }

    fn credit_address(state: &LedgerState, validator: &Address) -> Result<Address, RuntimeError> {
        Ok(state.validator_manager.get(validator)?.stake_credit)
    }
}
