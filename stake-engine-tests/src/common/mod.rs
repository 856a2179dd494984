//! Test ledger builder and fixtures shared by the integration tests.

pub use stake_engine::prelude::*;
use std::ops::{Deref, DerefMut};

pub const TEST_CHAIN_ID: u64 = 1337;

/// Accepts every proof.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllVerifier;

impl SignatureVerifier for AcceptAllVerifier {
    fn verify(&self, _: &[u8], _: &Bls12381G2Signature, _: &Bls12381G1PublicKey) -> u8 {
        VERIFICATION_SUCCESS
    }
}

/// Always answers with the given status code.
#[derive(Debug, Clone, Copy)]
pub struct FixedCodeVerifier(pub u8);

impl SignatureVerifier for FixedCodeVerifier {
    fn verify(&self, _: &[u8], _: &Bls12381G2Signature, _: &Bls12381G1PublicKey) -> u8 {
        self.0
    }
}

/// A deterministic, unique-per-`(tag, seed)` vote address.
pub fn test_vote_address(tag: &str, seed: u64) -> Bls12381G1PublicKey {
    let digest = hash([tag.as_bytes(), &seed.to_be_bytes()].concat());
    let mut bytes = [0u8; Bls12381G1PublicKey::LENGTH];
    bytes[..Hash::LENGTH].copy_from_slice(digest.as_ref());
    Bls12381G1PublicKey(bytes)
}

/// Registration params for a validator operated by `operator`. Every field that must be unique
/// is derived from `seed`.
pub fn validator_params(operator: Address, seed: u64) -> ValidatorRegistrationParams {
    ValidatorRegistrationParams {
        consensus_public_key: [b"consensus".as_slice(), &seed.to_be_bytes()].concat(),
        bls_proof: Bls12381G2Signature([0u8; Bls12381G2Signature::LENGTH]),
        vote_address: test_vote_address("registered", seed),
        commission: Commission::new(500, 1_000, 100),
        moniker: format!("Val{}", seed),
        operator,
        beneficiary: operator,
        validator_network_addresses: b"/ip4/127.0.0.1/tcp/6180".to_vec(),
        fullnode_network_addresses: b"/ip4/127.0.0.1/tcp/6182".to_vec(),
    }
}

pub fn genesis_validator_address(index: usize) -> Address {
    Address::from_low_u64(0x100 + index as u64)
}

pub fn genesis_validator_set(voting_powers: &[u128]) -> GenesisValidatorSet {
    let n = voting_powers.len();
    GenesisValidatorSet {
        validator_addresses: (0..n).map(genesis_validator_address).collect(),
        consensus_public_keys: (0..n)
            .map(|i| [b"genesis".as_slice(), &(i as u64).to_be_bytes()].concat())
            .collect(),
        fee_addresses: (0..n)
            .map(|i| Address::from_low_u64(0x200 + i as u64))
            .collect(),
        voting_powers: voting_powers.to_vec(),
        vote_addresses: (0..n)
            .map(|i| test_vote_address("genesis", i as u64))
            .collect(),
        monikers: Vec::new(),
    }
}

pub struct TestLedgerBuilder {
    config: StakeConfig,
    chain_id: u64,
    verifier: Box<dyn SignatureVerifier>,
    genesis_voting_powers: Vec<u128>,
}

impl TestLedgerBuilder {
    pub fn new() -> Self {
        Self {
            config: StakeConfig::test_default(),
            chain_id: TEST_CHAIN_ID,
            verifier: Box::new(AcceptAllVerifier),
            genesis_voting_powers: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: StakeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_verifier<V: SignatureVerifier + 'static>(mut self, verifier: V) -> Self {
        self.verifier = Box::new(verifier);
        self
    }

    /// Seeds one genesis validator per entry, each starting active with that voting power.
    pub fn with_genesis_validators(mut self, voting_powers: &[u128]) -> Self {
        self.genesis_voting_powers = voting_powers.to_vec();
        self
    }

    pub fn build(self) -> TestLedger {
        let mut ledger = StakingLedger::new(self.config, self.chain_id, self.verifier)
            .expect("test config must be valid");

        let genesis_validators = if self.genesis_voting_powers.is_empty() {
            Vec::new()
        } else {
            let validator_set = genesis_validator_set(&self.genesis_voting_powers);
            ledger
                .initialize_genesis(SYSTEM_CALLER, &validator_set)
                .expect_commit_success();
            validator_set.validator_addresses
        };

        TestLedger {
            ledger,
            genesis_validators,
            next_account: 0,
        }
    }
}

impl Default for TestLedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestLedger {
    ledger: StakingLedger,
    genesis_validators: Vec<Address>,
    next_account: u64,
}

impl TestLedger {
    pub fn genesis_validators(&self) -> &[Address] {
        &self.genesis_validators
    }

    pub fn new_account(&mut self) -> Address {
        self.next_account += 1;
        Address::from_low_u64(0x1_0000 + self.next_account)
    }

    /// Registers a fresh account as a self-operated validator.
    pub fn new_validator(&mut self, initial_stake: u128) -> Address {
        let account = self.new_account();
        let params = validator_params(account, self.next_account);
        *self
            .ledger
            .register_validator(account, params, initial_stake)
            .expect_commit_success()
    }

    /// Registers a validator and requests it to join the active set.
    pub fn new_joining_validator(&mut self, initial_stake: u128) -> Address {
        let validator = self.new_validator(initial_stake);
        self.ledger
            .join_validator_set(validator, validator)
            .expect_commit_success();
        validator
    }

    /// Moves ledger time forward by one epoch interval and triggers the transition.
    pub fn advance_epoch(&mut self) -> Epoch {
        let info = self.ledger.current_epoch_info();
        let now = self
            .ledger
            .state()
            .epoch_manager
            .current_time_micros
            .max(info.next_transition_time_micros());
        self.ledger
            .update_global_time(SYSTEM_CALLER, now)
            .expect_commit_success();
        *self
            .ledger
            .trigger_epoch_transition(SYSTEM_CALLER)
            .expect_commit_success()
    }

    pub fn active_validators(&self) -> Vec<Address> {
        self.ledger
            .validator_set()
            .unwrap()
            .active
            .into_iter()
            .map(|entry| entry.validator)
            .collect()
    }

    pub fn assert_partition_consistent(&self) {
        assert!(
            self.ledger.state().validator_manager.is_partition_consistent(),
            "validator sets and statuses disagree: {:?}",
            self.ledger.validator_set()
        );
    }
}

impl Deref for TestLedger {
    type Target = StakingLedger;

    fn deref(&self) -> &Self::Target {
        &self.ledger
    }
}

impl DerefMut for TestLedger {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ledger
    }
}
