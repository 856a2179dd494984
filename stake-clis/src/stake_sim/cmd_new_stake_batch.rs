use clap::Parser;
use stake_engine::prelude::*;
use std::path::PathBuf;

use crate::stake_sim::*;

/// Write a JWK batch file carrying a single stake event
#[derive(Parser, Debug)]
pub struct NewStakeBatch {
    /// The delegator the stake is deposited for
    #[clap(long)]
    pub user: Address,

    /// The validator receiving the stake
    #[clap(long)]
    pub validator: Address,

    /// Amount to stake
    #[clap(long)]
    pub amount: u128,

    /// Issuer the relay reports the event under
    #[clap(long, default_value = "gravity-relay")]
    pub issuer: String,

    /// Per-issuer event nonce, used to derive the replay identifier
    #[clap(long)]
    pub nonce: u64,

    /// Block on the source chain the event was observed in
    #[clap(long, default_value = "0")]
    pub source_block_number: u64,

    /// Minimum shares the admission must mint
    #[clap(long, default_value = "0")]
    pub shares: u128,

    /// Output file. Prints to stdout if omitted
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

impl NewStakeBatch {
    pub fn run<O: std::io::Write>(&self, out: &mut O) -> Result<(), Error> {
        let jwk = StakeEvent {
            user: self.user,
            stake_amount: self.amount,
            target_validator: self.validator,
        }
        .to_jwk()
        .map_err(Error::EncodeError)?;
        let params = CrossChainParams {
            identifier: CrossChainParams::identifier_from(&self.issuer, self.nonce),
            payload: jwk.data.clone(),
            target_validator: self.validator,
            shares: self.shares,
            source_block_number: self.source_block_number,
            issuer: self.issuer.clone(),
        };
        let group = ProviderJwks {
            issuer: self.issuer.clone(),
            version: self.nonce,
            jwks: vec![jwk],
        };

        let json = JwkBatchFile::from_batch(&[group], &[params])
            .to_json()
            .map_err(Error::ModelError)?;
        match &self.output {
            Some(path) => std::fs::write(path, json).map_err(Error::IOError)?,
            None => writeln!(out, "{}", json).map_err(Error::IOError)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stake_batch_writes_a_loadable_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        let cmd = NewStakeBatch {
            user: Address::from_low_u64(7),
            validator: Address::from_low_u64(0x101),
            amount: 250,
            issuer: "relay".to_owned(),
            nonce: 3,
            source_block_number: 99,
            shares: 0,
            output: Some(path.clone()),
        };

        cmd.run(&mut Vec::new()).unwrap();

        let (groups, params) = load_batch(&path).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(
            JwkVariant::from_u8(groups[0].jwks[0].variant),
            JwkVariant::StakeEvent
        );
        let event = StakeEvent::from_payload(&groups[0].jwks[0].data).unwrap();
        assert_eq!(event.stake_amount, 250);
        assert_eq!(params[0].identifier, CrossChainParams::identifier_from("relay", 3));
        assert_eq!(params[0].source_block_number, 99);
    }
}
