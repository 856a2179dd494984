use crate::constants::{COMMISSION_DENOMINATOR, MONIKER_MAX_LENGTH, MONIKER_MIN_LENGTH};
use crate::types::*;
use sbor::Sbor;

/// Lifecycle of a validator. `Unregistered` is only ever reported for unknown addresses; a
/// registered validator is never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidatorStatus {
    Unregistered,
    Inactive,
    PendingActive,
    Active,
    PendingInactive,
}

/// Commission terms of a validator, in basis points of `COMMISSION_DENOMINATOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sbor)]
pub struct Commission {
    pub rate: u64,
    pub max_rate: u64,
    pub max_change_rate: u64,
}

impl Commission {
    pub fn new(rate: u64, max_rate: u64, max_change_rate: u64) -> Self {
        Self {
            rate,
            max_rate,
            max_change_rate,
        }
    }

    /// `rate <= max_rate <= global_max_rate` and `max_change_rate <= max_rate`.
    pub fn is_within_bounds(&self, global_max_rate: u64) -> bool {
        self.rate <= self.max_rate
            && self.max_rate <= global_max_rate
            && self.max_rate <= COMMISSION_DENOMINATOR
            && self.max_change_rate <= self.max_rate
    }
}

/// Checks the display-name format: 3 to 9 characters, an ASCII uppercase letter first and ASCII
/// alphanumerics after it.
pub fn is_valid_moniker(moniker: &str) -> bool {
    let mut chars = moniker.chars();
    let length = moniker.chars().count();
    if !(MONIKER_MIN_LENGTH..=MONIKER_MAX_LENGTH).contains(&length) {
        return false;
    }
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Everything a prospective validator supplies at registration.
#[derive(Debug, Clone, PartialEq, Eq, Sbor)]
pub struct ValidatorRegistrationParams {
    pub consensus_public_key: Vec<u8>,
    /// Proof of possession of `vote_address`: a signature over
    /// `hash(operator || vote_address || chain_id)`. Verified once, never stored.
    pub bls_proof: Bls12381G2Signature,
    pub vote_address: Bls12381G1PublicKey,
    pub commission: Commission,
    pub moniker: String,
    pub operator: Address,
    pub beneficiary: Address,
    pub validator_network_addresses: Vec<u8>,
    pub fullnode_network_addresses: Vec<u8>,
}

/// The registry record of one validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorInfo {
    pub status: ValidatorStatus,
    pub operator: Address,
    pub beneficiary: Address,
    pub vote_address: Bls12381G1PublicKey,
    pub consensus_public_key: Vec<u8>,
    pub moniker: String,
    pub commission: Commission,
    pub stake_credit: Address,
    pub validator_network_addresses: Vec<u8>,
    pub fullnode_network_addresses: Vec<u8>,
    pub registration_epoch: Epoch,
    pub last_commission_update_epoch: Option<Epoch>,
}

/// A founding validator seeded at genesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisValidator {
    pub validator: Address,
    pub consensus_public_key: Vec<u8>,
    pub vote_address: Bls12381G1PublicKey,
    pub beneficiary: Address,
    pub voting_power: u128,
    pub moniker: String,
}

/// The founding validator set as delivered to genesis: parallel arrays, one position per
/// validator. `monikers` may be empty, in which case names are generated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenesisValidatorSet {
    pub validator_addresses: Vec<Address>,
    pub consensus_public_keys: Vec<Vec<u8>>,
    pub fee_addresses: Vec<Address>,
    pub voting_powers: Vec<u128>,
    pub vote_addresses: Vec<Bls12381G1PublicKey>,
    pub monikers: Vec<String>,
}

impl GenesisValidatorSet {
    pub fn len(&self) -> usize {
        self.validator_addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validator_addresses.is_empty()
    }

    /// Zips the parallel arrays, or returns `None` if any required array has a different
    /// length than `validator_addresses` or `monikers` is neither empty nor complete.
    pub fn zip(&self) -> Option<Vec<GenesisValidator>> {
        let n = self.len();
        if self.consensus_public_keys.len() != n
            || self.fee_addresses.len() != n
            || self.voting_powers.len() != n
            || self.vote_addresses.len() != n
            || !(self.monikers.is_empty() || self.monikers.len() == n)
        {
            return None;
        }
        let validators = (0..n)
            .map(|i| GenesisValidator {
                validator: self.validator_addresses[i],
                consensus_public_key: self.consensus_public_keys[i].clone(),
                vote_address: self.vote_addresses[i],
                beneficiary: self.fee_addresses[i],
                voting_power: self.voting_powers[i],
                moniker: self
                    .monikers
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Gen{}", i)),
            })
            .collect();
        Some(validators)
    }
}

/// A validator's membership in one of the three tracked sets, with the voting power it is
/// counted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSetEntry {
    pub validator: Address,
    pub voting_power: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidatorSetView {
    pub active: Vec<ValidatorSetEntry>,
    pub pending_active: Vec<ValidatorSetEntry>,
    pub pending_inactive: Vec<ValidatorSetEntry>,
    /// Sum of the voting power of the active set as of the last epoch boundary.
    pub total_voting_power: u128,
}
