mod address;
mod crypto;
mod epoch;
mod hash;

pub use address::*;
pub use crypto::*;
pub use epoch::*;
pub use hash::*;
