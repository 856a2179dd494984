mod blueprint;
mod error;

pub use blueprint::*;
pub use error::*;
