use super::StakeCreditError;
use crate::types::*;
use bnum::types::U256;

/// Stake on its way out of a pool. The amount is fixed when the shares are unlocked; the shares
/// stay in the pool's total until the withdrawal is claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingWithdrawal {
    pub shares: u128,
    pub amount: u128,
    pub maturity_epoch: Epoch,
}

/// Share-based ledger of the stake pooled behind one validator.
///
/// Share price is `total_pooled / total_shares`. Minting and redemption both round down, so every
/// rounding remainder stays in the pool and the price never decreases.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StakeCreditSubstate {
    pub validator: Address,
    pub total_pooled: u128,
    /// Active share balances plus the shares of unclaimed pending withdrawals.
    pub total_shares: u128,
    pub share_balances: BTreeMap<Address, u128>,
    pub pending_withdrawals: BTreeMap<Address, Vec<PendingWithdrawal>>,
    /// Sum of the amounts of every unclaimed pending withdrawal.
    pub pending_unlock_amount: u128,
}

impl StakeCreditSubstate {
    pub fn new(validator: Address) -> Self {
        Self {
            validator,
            ..Default::default()
        }
    }

    pub fn share_balance(&self, delegator: &Address) -> u128 {
        self.share_balances.get(delegator).copied().unwrap_or(0)
    }

    pub fn pending_withdrawals(&self, delegator: &Address) -> &[PendingWithdrawal] {
        self.pending_withdrawals
            .get(delegator)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The stake that will still be bonded next epoch.
    pub fn next_epoch_voting_power(&self) -> u128 {
        self.total_pooled.saturating_sub(self.pending_unlock_amount)
    }

    /// Shares a deposit of `amount` mints at the current price. The first deposit into an empty
    /// pool sets the price to one.
    pub fn shares_for_amount(&self, amount: u128) -> Result<u128, StakeCreditError> {
        if self.total_shares == 0 {
            return Ok(amount);
        }
        mul_div_floor(amount, self.total_shares, self.total_pooled)
    }

    /// Stake `shares` redeem for at the current price.
    pub fn amount_for_shares(&self, shares: u128) -> Result<u128, StakeCreditError> {
        if shares == 0 {
            return Ok(0);
        }
        mul_div_floor(shares, self.total_pooled, self.total_shares)
    }

    pub fn deposit(&mut self, delegator: Address, amount: u128) -> Result<u128, StakeCreditError> {
        if amount == 0 {
            return Err(StakeCreditError::ZeroAmount);
        }
        let shares = self.shares_for_amount(amount)?;
        if shares == 0 {
            return Err(StakeCreditError::ZeroSharesMinted { amount });
        }

        let total_pooled = checked_add(self.total_pooled, amount)?;
        let total_shares = checked_add(self.total_shares, shares)?;
        let balance = checked_add(self.share_balance(&delegator), shares)?;

        self.total_pooled = total_pooled;
        self.total_shares = total_shares;
        self.share_balances.insert(delegator, balance);

        Ok(shares)
    }

    /// Moves `shares` out of the delegator's active balance into a pending withdrawal maturing at
    /// `maturity_epoch`.
    pub fn unlock(
        &mut self,
        delegator: Address,
        shares: u128,
        maturity_epoch: Epoch,
    ) -> Result<PendingWithdrawal, StakeCreditError> {
        if shares == 0 {
            return Err(StakeCreditError::ZeroAmount);
        }
        let available = self.share_balance(&delegator);
        if shares > available {
            return Err(StakeCreditError::InsufficientShares {
                requested: shares,
                available,
            });
        }

        let amount = self.amount_for_shares(shares)?;
        let pending_unlock_amount = checked_add(self.pending_unlock_amount, amount)?;

        let withdrawal = PendingWithdrawal {
            shares,
            amount,
            maturity_epoch,
        };
        self.pending_unlock_amount = pending_unlock_amount;
        if available == shares {
            self.share_balances.remove(&delegator);
        } else {
            self.share_balances.insert(delegator, available - shares);
        }
        self.pending_withdrawals
            .entry(delegator)
            .or_default()
            .push(withdrawal);

        Ok(withdrawal)
    }

    /// Pays out every withdrawal of the delegator that has matured by `current_epoch`. Returns
    /// zero if nothing has matured.
    pub fn claim(
        &mut self,
        delegator: Address,
        current_epoch: Epoch,
    ) -> Result<u128, StakeCreditError> {
        let queue = match self.pending_withdrawals.get(&delegator) {
            Some(queue) => queue,
            None => return Ok(0),
        };

        let (matured, waiting): (Vec<PendingWithdrawal>, Vec<PendingWithdrawal>) = queue
            .iter()
            .copied()
            .partition(|withdrawal| withdrawal.maturity_epoch <= current_epoch);
        if matured.is_empty() {
            return Ok(0);
        }

        let mut shares = 0u128;
        let mut amount = 0u128;
        for withdrawal in &matured {
            shares = checked_add(shares, withdrawal.shares)?;
            amount = checked_add(amount, withdrawal.amount)?;
        }

        let total_shares = checked_sub(self.total_shares, shares)?;
        let total_pooled = checked_sub(self.total_pooled, amount)?;
        let pending_unlock_amount = checked_sub(self.pending_unlock_amount, amount)?;

        self.total_shares = total_shares;
        self.total_pooled = total_pooled;
        self.pending_unlock_amount = pending_unlock_amount;
        if waiting.is_empty() {
            self.pending_withdrawals.remove(&delegator);
        } else {
            self.pending_withdrawals.insert(delegator, waiting);
        }

        Ok(amount)
    }
}

fn checked_add(a: u128, b: u128) -> Result<u128, StakeCreditError> {
    a.checked_add(b).ok_or(StakeCreditError::ArithmeticOverflow)
}

fn checked_sub(a: u128, b: u128) -> Result<u128, StakeCreditError> {
    a.checked_sub(b).ok_or(StakeCreditError::IllegalState)
}

/// `floor(a * b / denominator)` with a 256-bit intermediate product.
fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128, StakeCreditError> {
    if denominator == 0 {
        return Err(StakeCreditError::IllegalState);
    }
    let quotient = U256::from(a) * U256::from(b) / U256::from(denominator);
    u128::try_from(quotient).map_err(|_| StakeCreditError::ArithmeticOverflow)
}
