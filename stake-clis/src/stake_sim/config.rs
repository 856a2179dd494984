use clap::Args;

use crate::stake_sim::*;
use stake_engine::prelude::*;

/// Staking parameters of the simulated chain
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Minimum next-epoch voting power a validator needs to join the active set
    #[clap(long, default_value = "1000")]
    pub min_validator_stake: u128,

    /// Per-epoch growth limit of pending voting power, in percent of the active total
    #[clap(long, default_value = "20")]
    pub voting_power_increase_limit: u64,

    /// Highest commission ceiling a validator may declare, in basis points
    #[clap(long, default_value = "5000")]
    pub max_commission_rate: u64,

    /// Epochs an unlocked stake waits before it can be claimed
    #[clap(long, default_value = "14")]
    pub unbonding_epochs: u64,

    /// Minimum time between two epoch transitions, in microseconds
    #[clap(long, default_value = "7200000000")]
    pub epoch_interval_micros: u64,

    /// Chain id bound into vote-address proofs
    #[clap(long, default_value = "1")]
    pub chain_id: u64,

    /// Accept every vote-address proof instead of verifying it with BLS
    #[clap(long)]
    pub skip_proof_verification: bool,
}

impl ConfigArgs {
    pub fn stake_config(&self) -> StakeConfig {
        StakeConfig::new(
            self.min_validator_stake,
            self.voting_power_increase_limit,
            self.max_commission_rate,
            self.unbonding_epochs,
            self.epoch_interval_micros,
        )
    }

    pub fn verifier(&self) -> Box<dyn SignatureVerifier> {
        if self.skip_proof_verification {
            Box::new(SkipProofVerification)
        } else {
            Box::new(BlstVerifier)
        }
    }

    pub fn new_ledger(&self) -> Result<StakingLedger, Error> {
        StakingLedger::new(self.stake_config(), self.chain_id, self.verifier())
            .map_err(Error::InvalidConfig)
    }
}

/// Reports every proof as valid. Simulation only.
#[derive(Debug, Clone, Copy)]
pub struct SkipProofVerification;

impl SignatureVerifier for SkipProofVerification {
    fn verify(&self, _: &[u8], _: &Bls12381G2Signature, _: &Bls12381G1PublicKey) -> u8 {
        VERIFICATION_SUCCESS
    }
}
