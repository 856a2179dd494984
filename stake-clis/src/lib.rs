pub mod error;
pub mod stake_sim;
