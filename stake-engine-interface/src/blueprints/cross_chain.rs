use crate::blueprints::validator_manager::ValidatorRegistrationParams;
use crate::types::*;
use sbor::{basic_decode, basic_encode, DecodeError, EncodeError, Sbor};

/// One observed key-set entry. `data` is opaque; for the stake variants it is the SBOR-encoded
/// event payload.
#[derive(Debug, Clone, PartialEq, Eq, Sbor)]
pub struct Jwk {
    pub variant: u8,
    pub data: Vec<u8>,
}

/// A per-issuer group of observed entries.
#[derive(Debug, Clone, PartialEq, Eq, Sbor)]
pub struct ProviderJwks {
    pub issuer: String,
    pub version: u64,
    pub jwks: Vec<Jwk>,
}

/// The tagged union carried in `Jwk::variant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JwkVariant {
    RsaJwk,
    UnsupportedJwk,
    StakeRegisterValidatorEvent,
    StakeEvent,
    /// A variant this engine does not know. Never an error, always ignored.
    Unknown(u8),
}

impl JwkVariant {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::RsaJwk,
            1 => Self::UnsupportedJwk,
            2 => Self::StakeRegisterValidatorEvent,
            3 => Self::StakeEvent,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::RsaJwk => 0,
            Self::UnsupportedJwk => 1,
            Self::StakeRegisterValidatorEvent => 2,
            Self::StakeEvent => 3,
            Self::Unknown(other) => other,
        }
    }
}

/// Relay-supplied, pre-validated companion of one `ProviderJwks` group, in the same order as the
/// groups of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Sbor)]
pub struct CrossChainParams {
    /// Key of the replay ledger.
    pub identifier: Hash,
    /// Must equal the `data` of the group's single entry.
    pub payload: Vec<u8>,
    /// The validator the event acts on: the registering user, or the stake target.
    pub target_validator: Address,
    /// Minimum number of shares the admission must mint; zero disables the check.
    pub shares: u128,
    pub source_block_number: u64,
    /// Must equal the group's issuer.
    pub issuer: String,
}

impl CrossChainParams {
    /// Derives the replay identifier of the `nonce`-th event reported by `issuer`.
    pub fn identifier_from(issuer: &str, nonce: u64) -> Hash {
        let mut preimage = Vec::with_capacity(issuer.len() + 8);
        preimage.extend_from_slice(issuer.as_bytes());
        preimage.extend_from_slice(&nonce.to_be_bytes());
        hash(preimage)
    }
}

/// Payload of variant 2: register `user` as a validator funded with `stake_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Sbor)]
pub struct StakeRegisterValidatorEvent {
    pub user: Address,
    pub stake_amount: u128,
    pub params: ValidatorRegistrationParams,
}

/// Payload of variant 3: deposit `stake_amount` into `target_validator`'s credit on behalf of
/// `user`.
#[derive(Debug, Clone, PartialEq, Eq, Sbor)]
pub struct StakeEvent {
    pub user: Address,
    pub stake_amount: u128,
    pub target_validator: Address,
}

macro_rules! impl_stake_payload {
    ($t:ty, $variant:expr) => {
        impl $t {
            pub const VARIANT: JwkVariant = $variant;

            pub fn to_payload(&self) -> Result<Vec<u8>, EncodeError> {
                basic_encode(self)
            }

            pub fn from_payload(payload: &[u8]) -> Result<Self, DecodeError> {
                basic_decode(payload)
            }

            /// Wraps the encoded event in the key-set entry the relay reports it as.
            pub fn to_jwk(&self) -> Result<Jwk, EncodeError> {
                Ok(Jwk {
                    variant: Self::VARIANT.to_u8(),
                    data: self.to_payload()?,
                })
            }
        }
    };
}

impl_stake_payload!(
    StakeRegisterValidatorEvent,
    JwkVariant::StakeRegisterValidatorEvent
);
impl_stake_payload!(StakeEvent, JwkVariant::StakeEvent);

/// What happened to one group of an admitted batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossChainEventOutcome {
    /// A new validator was registered for the user.
    ValidatorRegistered { identifier: Hash, validator: Address },
    /// Stake was deposited into the target validator's credit.
    StakeDeposited {
        identifier: Hash,
        validator: Address,
        delegator: Address,
        shares: u128,
    },
    /// The identifier had already been applied; nothing changed.
    Replayed { identifier: Hash },
    /// The group is not a single stake entry and is left to ordinary key-set bookkeeping.
    Ignored { issuer: String, reason: IgnoredReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    Empty,
    MultipleEntries(usize),
    NonStakeVariant(JwkVariant),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_decode_to_a_closed_sum() {
        assert_eq!(JwkVariant::from_u8(0), JwkVariant::RsaJwk);
        assert_eq!(JwkVariant::from_u8(1), JwkVariant::UnsupportedJwk);
        assert_eq!(
            JwkVariant::from_u8(2),
            JwkVariant::StakeRegisterValidatorEvent
        );
        assert_eq!(JwkVariant::from_u8(3), JwkVariant::StakeEvent);
        assert_eq!(JwkVariant::from_u8(200), JwkVariant::Unknown(200));
        assert_eq!(JwkVariant::Unknown(200).to_u8(), 200);
    }

    #[test]
    fn stake_event_payload_decodes_into_the_same_event() {
        let event = StakeEvent {
            user: Address::from_low_u64(1),
            stake_amount: 1_000,
            target_validator: Address::from_low_u64(2),
        };
        let jwk = event.to_jwk().unwrap();
        assert_eq!(jwk.variant, 3);
        assert_eq!(StakeEvent::from_payload(&jwk.data).unwrap(), event);
    }

    #[test]
    fn garbage_payload_fails_to_decode() {
        assert!(StakeEvent::from_payload(&[1, 2, 3]).is_err());
    }

    #[test]
    fn identifiers_are_distinct_per_issuer_and_nonce() {
        let a = CrossChainParams::identifier_from("https://issuer.one", 1);
        assert_eq!(a, CrossChainParams::identifier_from("https://issuer.one", 1));
        assert_ne!(a, CrossChainParams::identifier_from("https://issuer.one", 2));
        assert_ne!(a, CrossChainParams::identifier_from("https://issuer.two", 1));
    }
}
