use super::ValidatorManagerError;
use crate::errors::RuntimeError;
use crate::types::*;

/// The validator registry, the three tracked sets and the uniqueness indexes.
///
/// A validator is in at most one of `active`, `pending_active` and `pending_inactive`; being in
/// none of them means it is inactive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidatorManagerSubstate {
    pub validators: BTreeMap<Address, ValidatorInfo>,
    /// Active validators with the voting power they were committed with at the last epoch
    /// boundary.
    pub active: BTreeMap<Address, u128>,
    pub pending_active: BTreeSet<Address>,
    pub pending_inactive: BTreeSet<Address>,
    /// Sum of `active` as of the last epoch boundary.
    pub total_voting_power: u128,

    pub moniker_index: BTreeMap<Hash, Address>,
    pub vote_address_index: BTreeMap<Bls12381G1PublicKey, Address>,
    pub consensus_key_index: BTreeMap<Vec<u8>, Address>,
    pub operator_index: BTreeMap<Address, Address>,
}

impl ValidatorManagerSubstate {
    pub fn get(&self, validator: &Address) -> Result<&ValidatorInfo, RuntimeError> {
        self.validators
            .get(validator)
            .ok_or_else(|| ValidatorManagerError::ValidatorNotRegistered(*validator).into())
    }

    pub fn get_mut(&mut self, validator: &Address) -> Result<&mut ValidatorInfo, RuntimeError> {
        self.validators
            .get_mut(validator)
            .ok_or_else(|| ValidatorManagerError::ValidatorNotRegistered(*validator).into())
    }

    pub fn status(&self, validator: &Address) -> ValidatorStatus {
        self.validators
            .get(validator)
            .map(|info| info.status)
            .unwrap_or(ValidatorStatus::Unregistered)
    }

    /// Rejects a registration that would collide with an existing validator on any unique key.
    pub fn check_uniqueness(
        &self,
        validator: &Address,
        operator: &Address,
        moniker: &str,
        vote_address: &Bls12381G1PublicKey,
        consensus_public_key: &[u8],
    ) -> Result<(), ValidatorManagerError> {
        if self.validators.contains_key(validator) {
            return Err(ValidatorManagerError::AlreadyRegistered(*validator));
        }
        if self.moniker_index.contains_key(&hash(moniker)) {
            return Err(ValidatorManagerError::DuplicateMoniker(moniker.to_owned()));
        }
        if self.vote_address_index.contains_key(vote_address) {
            return Err(ValidatorManagerError::DuplicateVoteAddress(*vote_address));
        }
        if self.consensus_key_index.contains_key(consensus_public_key) {
            return Err(ValidatorManagerError::DuplicateConsensusAddress(
                consensus_public_key.to_vec(),
            ));
        }
        if self.operator_index.contains_key(operator) || self.validators.contains_key(operator) {
            return Err(ValidatorManagerError::AddressAlreadyInUse(*operator));
        }
        if self.operator_index.contains_key(validator) {
            return Err(ValidatorManagerError::AddressAlreadyInUse(*validator));
        }
        Ok(())
    }

    /// Records a new validator and all of its unique keys.
    pub fn insert(&mut self, validator: Address, info: ValidatorInfo) {
        self.moniker_index.insert(hash(&info.moniker), validator);
        self.vote_address_index.insert(info.vote_address, validator);
        self.consensus_key_index
            .insert(info.consensus_public_key.clone(), validator);
        self.operator_index.insert(info.operator, validator);
        self.validators.insert(validator, info);
    }

    /// Whether every validator's status agrees with its set membership and no validator is in
    /// more than one set.
    pub fn is_partition_consistent(&self) -> bool {
        let tracked = self
            .active
            .keys()
            .chain(self.pending_active.iter())
            .chain(self.pending_inactive.iter())
            .count();
        let distinct = self
            .active
            .keys()
            .chain(self.pending_active.iter())
            .chain(self.pending_inactive.iter())
            .collect::<BTreeSet<_>>()
            .len();
        if tracked != distinct {
            return false;
        }

        self.validators.iter().all(|(address, info)| {
            let expected = if self.active.contains_key(address) {
                ValidatorStatus::Active
            } else if self.pending_active.contains(address) {
                ValidatorStatus::PendingActive
            } else if self.pending_inactive.contains(address) {
                ValidatorStatus::PendingInactive
            } else {
                ValidatorStatus::Inactive
            };
            info.status == expected
        }) && self
            .active
            .keys()
            .chain(self.pending_active.iter())
            .chain(self.pending_inactive.iter())
            .all(|address| self.validators.contains_key(address))
    }
}
