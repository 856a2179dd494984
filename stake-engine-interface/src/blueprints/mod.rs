pub mod cross_chain;
pub mod epoch_manager;
pub mod stake_config;
pub mod validator_manager;
