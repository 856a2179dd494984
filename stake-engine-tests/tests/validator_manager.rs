use stake_engine_tests::common::*;

fn is_validator_error(err: &RuntimeError, expected: ValidatorManagerError) -> bool {
    *err == RuntimeError::ApplicationError(ApplicationError::ValidatorManagerError(expected))
}

#[test]
fn registered_validator_starts_inactive_with_its_stake_credit() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let account = ledger.new_account();
    let params = validator_params(account, 1);

    // Act
    let receipt = ledger.register_validator(account, params.clone(), 500);

    // Assert
    let validator = *receipt.expect_commit_success();
    assert_eq!(validator, account);
    assert_eq!(ledger.validator_status(&validator), ValidatorStatus::Inactive);

    let info = ledger.validator_info(&validator).unwrap();
    assert_eq!(info.moniker, params.moniker);
    assert_eq!(info.commission, params.commission);
    assert_eq!(info.stake_credit, StakeCreditBlueprint::address_of(&validator));
    assert_eq!(info.registration_epoch, Epoch::zero());

    let credit = ledger.stake_credit(&validator).unwrap();
    assert_eq!(credit.total_pooled, 500);
    assert_eq!(credit.share_balance(&validator), 500);
    assert!(matches!(
        receipt.events.as_slice(),
        [StakingEvent::ValidatorRegistered { initial_stake: 500, .. }]
    ));
}

#[test]
fn registering_twice_fails() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let validator = ledger.new_validator(100);

    // Act
    let receipt = ledger.register_validator(validator, validator_params(validator, 99), 100);

    // Assert
    receipt.expect_specific_failure(|e| {
        is_validator_error(e, ValidatorManagerError::AlreadyRegistered(validator))
    });
}

#[test]
fn registration_rejects_duplicate_unique_keys() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let existing = ledger.new_validator(100);
    let existing_params = validator_params(existing, 1);

    let cases: Vec<(ValidatorRegistrationParams, ValidatorManagerError)> = {
        let account = Address::from_low_u64(0xabc);
        let fresh = validator_params(account, 77);
        vec![
            (
                ValidatorRegistrationParams {
                    moniker: existing_params.moniker.clone(),
                    ..fresh.clone()
                },
                ValidatorManagerError::DuplicateMoniker(existing_params.moniker.clone()),
            ),
            (
                ValidatorRegistrationParams {
                    vote_address: existing_params.vote_address,
                    ..fresh.clone()
                },
                ValidatorManagerError::DuplicateVoteAddress(existing_params.vote_address),
            ),
            (
                ValidatorRegistrationParams {
                    consensus_public_key: existing_params.consensus_public_key.clone(),
                    ..fresh.clone()
                },
                ValidatorManagerError::DuplicateConsensusAddress(
                    existing_params.consensus_public_key.clone(),
                ),
            ),
            (
                ValidatorRegistrationParams {
                    operator: existing,
                    ..fresh
                },
                ValidatorManagerError::AddressAlreadyInUse(existing),
            ),
        ]
    };

    for (params, expected) in cases {
        // Act
        let receipt = ledger.register_validator(Address::from_low_u64(0xabc), params, 100);

        // Assert
        receipt.expect_specific_failure(|e| is_validator_error(e, expected.clone()));
    }
    assert_eq!(ledger.state().validator_manager.validators.len(), 1);
}

#[test]
fn registration_rejects_malformed_params() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let account = ledger.new_account();
    let params = validator_params(account, 1);

    // Act & Assert
    ledger
        .register_validator(
            account,
            ValidatorRegistrationParams {
                moniker: "lowercase".to_owned(),
                ..params.clone()
            },
            100,
        )
        .expect_specific_failure(|e| {
            is_validator_error(e, ValidatorManagerError::InvalidMoniker("lowercase".to_owned()))
        });

    let too_high = Commission::new(100, 6_000, 100);
    ledger
        .register_validator(
            account,
            ValidatorRegistrationParams {
                commission: too_high,
                ..params.clone()
            },
            100,
        )
        .expect_specific_failure(|e| {
            is_validator_error(e, ValidatorManagerError::InvalidCommission(too_high))
        });

    ledger
        .register_validator(
            account,
            ValidatorRegistrationParams {
                beneficiary: Address::ZERO,
                ..params
            },
            100,
        )
        .expect_specific_failure(|e| {
            is_validator_error(e, ValidatorManagerError::InvalidBeneficiary(Address::ZERO))
        });

    assert_eq!(ledger.validator_status(&account), ValidatorStatus::Unregistered);
}

#[test]
fn registration_fails_when_vote_address_proof_is_rejected() {
    for code in [VERIFICATION_FAILURE, 2, 0xff] {
        // Arrange
        let mut ledger = TestLedgerBuilder::new()
            .with_verifier(FixedCodeVerifier(code))
            .build();
        let account = ledger.new_account();

        // Act
        let receipt = ledger.register_validator(account, validator_params(account, 1), 100);

        // Assert
        receipt.expect_specific_failure(|e| {
            is_validator_error(e, ValidatorManagerError::InvalidVoteAddress)
        });
        assert!(ledger.stake_credit(&account).is_none());
    }
}

#[test]
fn join_becomes_active_only_at_the_epoch_boundary() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000])
        .build();
    let validator = ledger.new_validator(150);

    // Act
    ledger
        .join_validator_set(validator, validator)
        .expect_commit_success();

    // Assert
    assert_eq!(
        ledger.validator_status(&validator),
        ValidatorStatus::PendingActive
    );
    assert!(!ledger.active_validators().contains(&validator));
    assert_eq!(ledger.validator_set().unwrap().total_voting_power, 1_000);

    ledger.advance_epoch();
    assert_eq!(ledger.validator_status(&validator), ValidatorStatus::Active);
    let set = ledger.validator_set().unwrap();
    assert!(set.pending_active.is_empty());
    assert_eq!(set.total_voting_power, 1_150);
    assert!(set
        .active
        .contains(&ValidatorSetEntry { validator, voting_power: 150 }));
    ledger.assert_partition_consistent();
}

#[test]
fn join_requires_minimum_stake() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000])
        .build();
    let validator = ledger.new_validator(99);

    // Act
    let receipt = ledger.join_validator_set(validator, validator);

    // Assert
    receipt.expect_specific_failure(|e| {
        is_validator_error(
            e,
            ValidatorManagerError::InsufficientStake {
                required: 100,
                actual: 99,
            },
        )
    });
    assert_eq!(ledger.validator_status(&validator), ValidatorStatus::Inactive);
}

#[test]
fn join_counts_delegated_stake() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000])
        .build();
    let validator = ledger.new_validator(60);
    let delegator = ledger.new_account();
    ledger
        .deposit(delegator, validator, 40)
        .expect_commit_success();

    // Act
    let receipt = ledger.join_validator_set(validator, validator);

    // Assert
    receipt.expect_commit_success();
    assert_eq!(
        ledger.validator_set().unwrap().pending_active,
        vec![ValidatorSetEntry {
            validator,
            voting_power: 100
        }]
    );
}

#[test]
fn pending_voting_power_is_capped_by_the_increase_limit() {
    // Arrange
    let config = StakeConfig::test_default().with_voting_power_increase_limit(10);
    let mut ledger = TestLedgerBuilder::new()
        .with_config(config)
        .with_genesis_validators(&[1_000])
        .build();
    let at_limit = ledger.new_validator(100);
    let over_limit = ledger.new_validator(101);

    // Act
    let rejected = ledger.join_validator_set(over_limit, over_limit);
    let accepted = ledger.join_validator_set(at_limit, at_limit);

    // Assert
    rejected.expect_specific_failure(|e| {
        is_validator_error(
            e,
            ValidatorManagerError::VotingPowerIncreaseExceedsLimit {
                pending: 101,
                limit: 100,
            },
        )
    });
    accepted.expect_commit_success();
}

#[test]
fn pending_voting_power_accumulates_across_candidates() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000])
        .build();
    let first = ledger.new_joining_validator(150);
    let second = ledger.new_validator(100);

    // Act
    let receipt = ledger.join_validator_set(second, second);

    // Assert
    receipt.expect_specific_failure(|e| {
        is_validator_error(
            e,
            ValidatorManagerError::VotingPowerIncreaseExceedsLimit {
                pending: 250,
                limit: 200,
            },
        )
    });

    // Once the first candidate is active the cap is measured against the new total.
    ledger.advance_epoch();
    assert_eq!(ledger.validator_status(&first), ValidatorStatus::Active);
    ledger
        .join_validator_set(second, second)
        .expect_commit_success();
}

#[test]
fn first_join_without_committed_voting_power_is_unbounded() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let validator = ledger.new_validator(1_000_000);

    // Act
    let receipt = ledger.join_validator_set(validator, validator);

    // Assert
    receipt.expect_commit_success();
    ledger.advance_epoch();
    assert_eq!(ledger.active_validators(), vec![validator]);
}

#[test]
fn join_requires_inactive_status() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000])
        .build();
    let validator = ledger.new_joining_validator(100);

    // Act
    let receipt = ledger.join_validator_set(validator, validator);

    // Assert
    receipt.expect_specific_failure(|e| {
        is_validator_error(
            e,
            ValidatorManagerError::InvalidValidatorStatus {
                validator,
                expected: ValidatorStatus::Inactive,
                actual: ValidatorStatus::PendingActive,
            },
        )
    });
}

#[test]
fn only_validator_or_operator_can_request_set_changes() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000])
        .build();
    let account = ledger.new_account();
    let operator = ledger.new_account();
    let stranger = ledger.new_account();
    let params = ValidatorRegistrationParams {
        operator,
        ..validator_params(account, 1)
    };
    let validator = *ledger
        .register_validator(account, params, 100)
        .expect_commit_success();

    // Act
    let by_stranger = ledger.join_validator_set(stranger, validator);
    let by_operator = ledger.join_validator_set(operator, validator);

    // Assert
    by_stranger.expect_specific_failure(|e| {
        matches!(
            e,
            RuntimeError::AuthError(AuthError::NotValidatorOrOperator { caller, .. })
                if *caller == stranger
        )
    });
    by_operator.expect_commit_success();
}

#[test]
fn unknown_validator_cannot_join() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let account = ledger.new_account();

    // Act
    let receipt = ledger.join_validator_set(account, account);

    // Assert
    receipt.expect_specific_failure(|e| {
        is_validator_error(e, ValidatorManagerError::ValidatorNotRegistered(account))
    });
}

#[test]
fn leave_moves_validator_out_of_the_active_set_and_inactive_at_the_boundary() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000, 1_000])
        .build();
    let leaving = ledger.genesis_validators()[0];

    // Act
    let receipt = ledger.leave_validator_set(leaving, leaving);

    // Assert
    receipt.expect_commit_success();
    assert_eq!(
        ledger.validator_status(&leaving),
        ValidatorStatus::PendingInactive
    );
    assert!(!ledger.active_validators().contains(&leaving));
    ledger.assert_partition_consistent();

    ledger.advance_epoch();
    assert_eq!(ledger.validator_status(&leaving), ValidatorStatus::Inactive);
    assert_eq!(ledger.validator_set().unwrap().total_voting_power, 1_000);
    ledger.assert_partition_consistent();
}

#[test]
fn the_last_active_validator_cannot_leave() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000, 1_000])
        .build();
    let [first, second] = [ledger.genesis_validators()[0], ledger.genesis_validators()[1]];
    ledger.leave_validator_set(first, first).expect_commit_success();

    // Act
    let receipt = ledger.leave_validator_set(second, second);

    // Assert
    receipt.expect_specific_failure(|e| {
        is_validator_error(e, ValidatorManagerError::CannotRemoveLastActiveValidator)
    });
    assert_eq!(ledger.validator_status(&second), ValidatorStatus::Active);
}

#[test]
fn leave_requires_active_status() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000, 1_000])
        .build();
    let validator = ledger.new_validator(100);

    // Act
    let receipt = ledger.leave_validator_set(validator, validator);

    // Assert
    receipt.expect_specific_failure(|e| {
        is_validator_error(
            e,
            ValidatorManagerError::InvalidValidatorStatus {
                validator,
                expected: ValidatorStatus::Active,
                actual: ValidatorStatus::Inactive,
            },
        )
    });
}

#[test]
fn force_leave_is_governance_only() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000, 1_000])
        .build();
    let validator = ledger.genesis_validators()[0];

    // Act
    let by_validator = ledger.force_leave_validator_set(validator, validator);
    let by_governance = ledger.force_leave_validator_set(GOVERNANCE, validator);

    // Assert
    by_validator.expect_specific_failure(|e| {
        *e == RuntimeError::AuthError(AuthError::Unauthorized {
            expected: GOVERNANCE,
            actual: validator,
        })
    });
    by_governance.expect_commit_success();
    assert!(by_governance.events.contains(&StakingEvent::ValidatorLeaveRequested {
        validator,
        forced: true
    }));
    assert_eq!(
        ledger.validator_status(&validator),
        ValidatorStatus::PendingInactive
    );
}

#[test]
fn epoch_transition_applies_joins_and_leaves_together() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000, 1_000, 1_000])
        .build();
    let leaving = ledger.genesis_validators()[0];
    let staying = ledger.genesis_validators()[1..].to_vec();
    let joining = ledger.new_joining_validator(300);
    ledger.leave_validator_set(leaving, leaving).expect_commit_success();

    // Act
    ledger.advance_epoch();

    // Assert
    let mut expected_active = staying;
    expected_active.push(joining);
    expected_active.sort();
    assert_eq!(ledger.active_validators(), expected_active);
    assert_eq!(ledger.validator_set().unwrap().total_voting_power, 2_300);
    assert_eq!(ledger.validator_status(&leaving), ValidatorStatus::Inactive);
    assert_eq!(ledger.validator_status(&joining), ValidatorStatus::Active);
    ledger.assert_partition_consistent();
}

#[test]
fn one_epoch_transition_activates_every_pending_joiner() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_config(StakeConfig::test_default().with_voting_power_increase_limit(50))
        .with_genesis_validators(&[1_000, 1_000])
        .build();
    let joining = vec![
        ledger.new_joining_validator(100),
        ledger.new_joining_validator(100),
        ledger.new_joining_validator(100),
    ];
    for validator in &joining {
        assert_eq!(
            ledger.validator_status(validator),
            ValidatorStatus::PendingActive
        );
    }
    let epoch_before = ledger.current_epoch_info().epoch.number();

    // Act
    let epoch_after = ledger.advance_epoch();

    // Assert
    assert_eq!(epoch_after.number(), epoch_before + 1);
    for validator in &joining {
        assert_eq!(ledger.validator_status(validator), ValidatorStatus::Active);
    }
    let set = ledger.validator_set().unwrap();
    assert!(set.pending_active.is_empty());
    assert_eq!(set.active.len(), 5);
    assert_eq!(set.total_voting_power, 2_300);
    ledger.assert_partition_consistent();
}

#[test]
fn active_voting_power_is_recomputed_at_epoch_boundaries() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000, 1_000])
        .build();
    let validator = ledger.genesis_validators()[0];
    let delegator = ledger.new_account();
    ledger
        .deposit(delegator, validator, 500)
        .expect_commit_success();
    assert_eq!(ledger.validator_set().unwrap().total_voting_power, 2_000);

    // Act
    ledger.advance_epoch();

    // Assert
    let set = ledger.validator_set().unwrap();
    assert_eq!(set.total_voting_power, 2_500);
    assert!(set.active.contains(&ValidatorSetEntry {
        validator,
        voting_power: 1_500
    }));
}

#[test]
fn commission_rate_moves_within_its_bounds_once_per_epoch() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000])
        .build();
    let validator = ledger.new_validator(100);

    // Act & Assert
    ledger
        .update_commission_rate(validator, validator, 601)
        .expect_specific_failure(|e| {
            is_validator_error(
                e,
                ValidatorManagerError::InvalidCommission(Commission::new(601, 1_000, 100)),
            )
        });

    let receipt = ledger.update_commission_rate(validator, validator, 600);
    receipt.expect_commit_success();
    assert_eq!(
        receipt.events,
        vec![StakingEvent::CommissionRateUpdated {
            validator,
            old_rate: 500,
            new_rate: 600
        }]
    );

    ledger
        .update_commission_rate(validator, validator, 650)
        .expect_specific_failure(|e| {
            is_validator_error(e, ValidatorManagerError::CommissionUpdateTooFrequent(validator))
        });

    ledger.advance_epoch();
    ledger
        .update_commission_rate(validator, validator, 650)
        .expect_commit_success();
    assert_eq!(ledger.validator_info(&validator).unwrap().commission.rate, 650);
}

#[test]
fn commission_rate_never_exceeds_max_rate() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let account = ledger.new_account();
    let params = ValidatorRegistrationParams {
        commission: Commission::new(950, 1_000, 100),
        ..validator_params(account, 1)
    };
    let validator = *ledger
        .register_validator(account, params, 100)
        .expect_commit_success();

    // Act
    let receipt = ledger.update_commission_rate(validator, validator, 1_001);

    // Assert
    receipt.expect_specific_failure(|e| {
        is_validator_error(
            e,
            ValidatorManagerError::InvalidCommission(Commission::new(1_001, 1_000, 100)),
        )
    });
}

#[test]
fn beneficiary_can_be_updated_but_not_to_zero() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new().build();
    let validator = ledger.new_validator(100);
    let beneficiary = ledger.new_account();

    // Act
    let zero = ledger.update_beneficiary(validator, validator, Address::ZERO);
    let updated = ledger.update_beneficiary(validator, validator, beneficiary);

    // Assert
    zero.expect_specific_failure(|e| {
        is_validator_error(e, ValidatorManagerError::InvalidBeneficiary(Address::ZERO))
    });
    updated.expect_commit_success();
    assert_eq!(
        ledger.validator_info(&validator).unwrap().beneficiary,
        beneficiary
    );
}

#[test]
fn failed_transactions_commit_no_events() {
    // Arrange
    let mut ledger = TestLedgerBuilder::new()
        .with_genesis_validators(&[1_000])
        .build();
    let validator = ledger.new_validator(10);
    let events_before = ledger.events().len();

    // Act
    let receipt = ledger.join_validator_set(validator, validator);

    // Assert
    assert!(!receipt.is_commit_success());
    assert!(receipt.events.is_empty());
    assert_eq!(ledger.events().len(), events_before);
}
