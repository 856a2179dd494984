use crate::types::hash;
use sbor::Sbor;
use std::fmt;
use std::str::FromStr;

/// A 20-byte account address. Validators, operators, beneficiaries, delegators and
/// StakeCredit instances are all identified by one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Sbor)]
#[sbor(transparent)]
pub struct Address(pub [u8; Self::LENGTH]);

impl Address {
    pub const LENGTH: usize = 20;

    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    /// Builds an address whose lower eight bytes are `value` in big-endian order.
    pub const fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; Self::LENGTH];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[Self::LENGTH - 8 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Derives an address from the first 20 bytes of `blake2b-256(domain || data)`.
    pub fn derive(domain: &[u8], data: &[u8]) -> Self {
        let mut preimage = Vec::with_capacity(domain.len() + data.len());
        preimage.extend_from_slice(domain);
        preimage.extend_from_slice(data);
        let digest = hash(preimage);
        let mut bytes = [0u8; Self::LENGTH];
        bytes.copy_from_slice(&digest.0[..Self::LENGTH]);
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; Self::LENGTH]
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

//========
// error
//========

/// Represents an error when parsing an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAddressError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid address length: {0}")]
    InvalidLength(usize),
}

//========
// binary
//========

impl TryFrom<&[u8]> for Address {
    type Error = ParseAddressError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; Self::LENGTH] = slice
            .try_into()
            .map_err(|_| ParseAddressError::InvalidLength(slice.len()))?;
        Ok(Self(bytes))
    }
}

//======
// text
//======

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|_| ParseAddressError::InvalidHex(s.to_owned()))?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
