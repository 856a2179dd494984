use clap::Parser;
use std::path::PathBuf;

use crate::stake_sim::*;

/// Print the founding validators of a genesis configuration file
#[derive(Parser, Debug)]
pub struct ShowGenesis {
    /// Genesis configuration file
    #[clap(default_value = "generate/genesis_config.json")]
    pub path: PathBuf,
}

impl ShowGenesis {
    pub fn run<O: std::io::Write>(&self, out: &mut O) -> Result<(), Error> {
        let validator_set = load_genesis(&self.path)?;
        let validators = validator_set
            .zip()
            .ok_or_else(|| Error::InvalidGenesis("validator arrays differ in length".to_owned()))?;

        let mut total_voting_power = 0u128;
        for validator in &validators {
            writeln!(
                out,
                "{} {:<9} {} fee {}",
                validator.validator,
                validator.moniker,
                validator.voting_power,
                validator.beneficiary
            )
            .map_err(Error::IOError)?;
            total_voting_power = total_voting_power.saturating_add(validator.voting_power);
        }
        writeln!(
            out,
            "{} validators, total voting power {}",
            validators.len(),
            total_voting_power
        )
        .map_err(Error::IOError)?;

        Ok(())
    }
}
