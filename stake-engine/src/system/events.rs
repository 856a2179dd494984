use crate::types::*;

/// Events emitted by committed transactions, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingEvent {
    GenesisInitialized {
        validator_count: usize,
        total_voting_power: u128,
    },
    ConfigUpdated {
        key: String,
    },
    ValidatorRegistered {
        validator: Address,
        operator: Address,
        stake_credit: Address,
        initial_stake: u128,
    },
    ValidatorJoinRequested {
        validator: Address,
        voting_power: u128,
    },
    ValidatorLeaveRequested {
        validator: Address,
        forced: bool,
    },
    ValidatorStatusChanged {
        validator: Address,
        from: ValidatorStatus,
        to: ValidatorStatus,
    },
    CommissionRateUpdated {
        validator: Address,
        old_rate: u64,
        new_rate: u64,
    },
    BeneficiaryUpdated {
        validator: Address,
        beneficiary: Address,
    },
    EpochChanged {
        epoch: Epoch,
        active_validator_count: usize,
        total_voting_power: u128,
    },
    StakeDeposited {
        validator: Address,
        delegator: Address,
        amount: u128,
        shares: u128,
    },
    StakeUnlocked {
        validator: Address,
        delegator: Address,
        shares: u128,
        amount: u128,
        maturity_epoch: Epoch,
    },
    StakeClaimed {
        validator: Address,
        delegator: Address,
        amount: u128,
    },
    CrossChainEventAdmitted {
        identifier: Hash,
        variant: JwkVariant,
        source_block_number: u64,
    },
}
