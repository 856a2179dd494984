use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stake_engine_tests::common::*;

fn is_credit_error(err: &RuntimeError, expected: StakeCreditError) -> bool {
    *err == RuntimeError::ApplicationError(ApplicationError::StakeCreditError(expected))
}

#[test]
fn deposit_mints_shares_at_the_current_price() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let validator = ledger.new_validator(1_000);
    let delegator = ledger.new_account();

    // Act
    let receipt = ledger.deposit(delegator, validator, 250);

    // Assert
    let shares = *receipt.expect_commit_success();
    assert_eq!(shares, 250);
    assert_eq!(
        receipt.events,
        vec![StakingEvent::StakeDeposited {
            validator,
            delegator,
            amount: 250,
            shares: 250
        }]
    );
    let credit = ledger.stake_credit(&validator).unwrap();
    assert_eq!(credit.total_pooled, 1_250);
    assert_eq!(credit.total_shares, 1_250);
    assert_eq!(credit.share_balance(&delegator), 250);
}

#[test]
fn deposit_of_zero_fails() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let validator = ledger.new_validator(1_000);
    let delegator = ledger.new_account();

    // Act
    let receipt = ledger.deposit(delegator, validator, 0);

    // Assert
    receipt.expect_specific_failure(|e| is_credit_error(e, StakeCreditError::ZeroAmount));
}

#[test]
fn deposit_to_unregistered_validator_fails() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let delegator = ledger.new_account();
    let nobody = ledger.new_account();

    // Act
    let receipt = ledger.deposit(delegator, nobody, 100);

    // Assert
    receipt.expect_specific_failure(|e| {
        *e == RuntimeError::ApplicationError(ApplicationError::ValidatorManagerError(
            ValidatorManagerError::ValidatorNotRegistered(nobody),
        ))
    });
}

#[test]
fn unlocked_stake_is_claimable_only_after_unbonding() {
    // Arrange
    let config = StakeConfig::test_default().with_unbonding_epochs(2);
    let mut ledger = TestLedgerBuilder::new()
        .with_config(config)
        .with_genesis_validators(&[1_000])
        .build();
    let validator = ledger.genesis_validators()[0];
    let delegator = ledger.new_account();
    ledger
        .deposit(delegator, validator, 400)
        .expect_commit_success();

    // Act
    let withdrawal = *ledger
        .unlock(delegator, validator, 150)
        .expect_commit_success();

    // Assert
    assert_eq!(
        withdrawal,
        PendingWithdrawal {
            shares: 150,
            amount: 150,
            maturity_epoch: Epoch::of(2),
        }
    );
    let credit = ledger.stake_credit(&validator).unwrap();
    assert_eq!(credit.share_balance(&delegator), 250);
    assert_eq!(credit.next_epoch_voting_power(), 1_250);

    assert_eq!(*ledger.claim(delegator, validator).expect_commit_success(), 0);
    ledger.advance_epoch();
    assert_eq!(*ledger.claim(delegator, validator).expect_commit_success(), 0);
    ledger.advance_epoch();

    let receipt = ledger.claim(delegator, validator);
    assert_eq!(*receipt.expect_commit_success(), 150);
    assert_eq!(
        receipt.events,
        vec![StakingEvent::StakeClaimed {
            validator,
            delegator,
            amount: 150
        }]
    );
    let credit = ledger.stake_credit(&validator).unwrap();
    assert_eq!(credit.total_pooled, 1_250);
    assert_eq!(credit.total_shares, 1_250);
    assert!(credit.pending_withdrawals(&delegator).is_empty());
}

#[test]
fn unlocked_stake_stops_counting_towards_voting_power_at_the_next_epoch() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000, 1_000])
        .build();
    let validator = ledger.genesis_validators()[0];

    // Act
    ledger
        .unlock(validator, validator, 400)
        .expect_commit_success();

    // Assert
    assert_eq!(ledger.validator_set().unwrap().total_voting_power, 2_000);
    ledger.advance_epoch();
    let set = ledger.validator_set().unwrap();
    assert_eq!(set.total_voting_power, 1_600);
    assert!(set.active.contains(&ValidatorSetEntry {
        validator,
        voting_power: 600
    }));
}

#[test]
fn unlock_validates_share_amount() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let validator = ledger.new_validator(1_000);
    let delegator = ledger.new_account();
    ledger
        .deposit(delegator, validator, 10)
        .expect_commit_success();

    // Act & Assert
    ledger
        .unlock(delegator, validator, 0)
        .expect_specific_failure(|e| is_credit_error(e, StakeCreditError::ZeroAmount));
    ledger
        .unlock(delegator, validator, 11)
        .expect_specific_failure(|e| {
            is_credit_error(
                e,
                StakeCreditError::InsufficientShares {
                    requested: 11,
                    available: 10,
                },
            )
        });
}

#[test]
fn random_operations_keep_the_pool_consistent() {
    // Arrange
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000, 1_000])
        .build();
    let validator = ledger.genesis_validators()[0];
    let delegators: Vec<Address> = (0..5).map(|_| ledger.new_account()).collect();
    let mut price = (1u128, 1u128);

    for _ in 0..300 {
        // Act
        let delegator = delegators[rng.gen_range(0..delegators.len())];
        match rng.gen_range(0..4) {
            0 => {
                ledger.deposit(delegator, validator, rng.gen_range(1..1_000_000));
            }
            1 => {
                let balance = ledger.stake_credit(&validator).unwrap().share_balance(&delegator);
                if balance > 0 {
                    ledger.unlock(delegator, validator, rng.gen_range(1..=balance));
                }
            }
            2 => {
                ledger.claim(delegator, validator);
            }
            _ => {
                ledger.advance_epoch();
            }
        }

        // Assert
        let credit = ledger.stake_credit(&validator).unwrap();
        let pending_shares: u128 = credit
            .pending_withdrawals
            .values()
            .flatten()
            .map(|withdrawal| withdrawal.shares)
            .sum();
        let pending_amount: u128 = credit
            .pending_withdrawals
            .values()
            .flatten()
            .map(|withdrawal| withdrawal.amount)
            .sum();
        let active_shares: u128 = credit.share_balances.values().sum();
        assert_eq!(active_shares + pending_shares, credit.total_shares);
        assert_eq!(pending_amount, credit.pending_unlock_amount);
        assert!(credit.pending_unlock_amount <= credit.total_pooled);

        // The share price never decreases.
        let (pooled, shares) = (credit.total_pooled, credit.total_shares);
        assert!(pooled * price.1 >= price.0 * shares);
        price = (pooled, shares);
        ledger.assert_partition_consistent();
    }
}
