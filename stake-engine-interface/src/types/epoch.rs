use sbor::Sbor;
use std::fmt;

/// A monotonically increasing epoch number. Set-membership changes only ever take effect when
/// this advances.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Sbor)]
#[sbor(transparent)]
pub struct Epoch(u64);

impl Epoch {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn of(number: u64) -> Self {
        Self(number)
    }

    pub const fn number(&self) -> u64 {
        self.0
    }

    /// The epoch after this one, or `None` on overflow.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// The epoch `epoch_count` epochs after this one, or `None` on overflow.
    pub fn after(&self, epoch_count: u64) -> Option<Self> {
        self.0.checked_add(epoch_count).map(Self)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}
