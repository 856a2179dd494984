use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use sbor::Sbor;
use std::fmt;
use std::str::FromStr;

/// Represents a 32-byte hash digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sbor)]
#[sbor(transparent)]
pub struct Hash(pub [u8; Self::LENGTH]);

impl Hash {
    pub const LENGTH: usize = 32;
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Computes the blake2b-256 digest of a message.
pub fn hash<T: AsRef<[u8]>>(data: T) -> Hash {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(data.as_ref());
    let mut digest = [0u8; Hash::LENGTH];
    digest.copy_from_slice(hasher.finalize().as_slice());
    Hash(digest)
}

//========
// error
//========

/// Represents an error when parsing hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseHashError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid hash length: {0}")]
    InvalidLength(usize),
}

//========
// binary
//========

impl TryFrom<&[u8]> for Hash {
    type Error = ParseHashError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; Self::LENGTH] = slice
            .try_into()
            .map_err(|_| ParseHashError::InvalidLength(slice.len()))?;
        Ok(Self(bytes))
    }
}

//======
// text
//======

impl FromStr for Hash {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|_| ParseHashError::InvalidHex(s.to_owned()))?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
