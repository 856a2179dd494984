mod blueprint;
mod error;
mod substates;

pub use blueprint::*;
pub use error::*;
pub use substates::*;
