pub mod cross_chain;
pub mod epoch_manager;
pub mod genesis;
pub mod stake_config;
pub mod stake_credit;
pub mod validator_manager;
