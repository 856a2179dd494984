use sbor::Sbor;
use std::fmt;
use std::str::FromStr;

/// BLS12-381 ciphersuite v1
/// It has following parameters
///  - hash-to-curve: BLS12381G2_XMD:SHA-256_SSWU_RO
///    - pairing-friendly elliptic curve: BLS12-381
///    - hash function: SHA-256
///    - signature variant: G2 minimal pubkey size
///  - scheme:
///    - proof-of-possession
pub const BLS12381_CIPHERSITE_V1: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// A validator's vote address: a BLS12-381 G1 public key (48 bytes, compressed).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sbor)]
#[sbor(transparent)]
pub struct Bls12381G1PublicKey(pub [u8; Self::LENGTH]);

impl Bls12381G1PublicKey {
    pub const LENGTH: usize = 48;
}

/// A BLS12-381 G2 signature (96 bytes, compressed). Used as the proof of possession of a vote
/// address at registration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sbor)]
#[sbor(transparent)]
pub struct Bls12381G2Signature(pub [u8; Self::LENGTH]);

impl Bls12381G2Signature {
    pub const LENGTH: usize = 96;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBlsError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

macro_rules! impl_bls_bytes {
    ($t:ty) => {
        impl AsRef<[u8]> for $t {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $t {
            type Error = ParseBlsError;

            fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
                let bytes = slice
                    .try_into()
                    .map_err(|_| ParseBlsError::InvalidLength {
                        expected: <$t>::LENGTH,
                        actual: slice.len(),
                    })?;
                Ok(Self(bytes))
            }
        }

        impl FromStr for $t {
            type Err = ParseBlsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let bytes =
                    hex::decode(digits).map_err(|_| ParseBlsError::InvalidHex(s.to_owned()))?;
                Self::try_from(bytes.as_slice())
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $t {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self)
            }
        }
    };
}

impl_bls_bytes!(Bls12381G1PublicKey);
impl_bls_bytes!(Bls12381G2Signature);
