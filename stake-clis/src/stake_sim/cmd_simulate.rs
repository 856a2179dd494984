use clap::Parser;
use stake_engine::prelude::*;
use std::path::PathBuf;
use tracing::info;

use crate::stake_sim::*;

/// Run genesis, admit relay batches and advance epochs
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Genesis configuration file
    #[clap(short, long, default_value = "generate/genesis_config.json")]
    pub genesis: PathBuf,

    /// JWK batch files. One batch is admitted per epoch, in the order given
    #[clap(short, long)]
    pub batch: Vec<PathBuf>,

    /// Number of epoch transitions to run. Raised to the number of batches if lower
    #[clap(short, long, default_value = "1")]
    pub epochs: u64,

    /// Save the final validator set as JSON
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    #[clap(flatten)]
    pub config: ConfigArgs,
}

impl Simulate {
    pub fn run<O: std::io::Write>(&self, out: &mut O) -> Result<(), Error> {
        let genesis = load_genesis(&self.genesis)?;
        let batches = self
            .batch
            .iter()
            .map(|path| load_batch(path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut ledger = self.config.new_ledger()?;
        commit(ledger.initialize_genesis(SYSTEM_CALLER, &genesis))?;
        info!(path = %self.genesis.display(), "genesis loaded");
        write_validator_set(out, &ledger)?;

        let epochs = self.epochs.max(batches.len() as u64);
        let mut batches = batches.into_iter();
        for _ in 0..epochs {
            if let Some((groups, params)) = batches.next() {
                let outcomes =
                    commit(ledger.process_cross_chain_batch(SYSTEM_CALLER, &groups, &params))?;
                for outcome in &outcomes {
                    writeln!(out, "  {}", describe_outcome(outcome)).map_err(Error::IOError)?;
                }
            }
            advance_epoch(&mut ledger)?;
            write_validator_set(out, &ledger)?;
        }

        if let Some(path) = &self.output {
            let report = ValidatorSetReport::from_ledger(&ledger)?;
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::ModelError(ModelError::Json(e.to_string())))?;
            std::fs::write(path, json).map_err(Error::IOError)?;
            info!(path = %path.display(), "validator set saved");
        }

        Ok(())
    }
}

/// Moves the ledger clock to the next transition time and triggers the transition.
pub fn advance_epoch(ledger: &mut StakingLedger) -> Result<Epoch, Error> {
    let now = ledger
        .current_epoch_info()
        .next_transition_time_micros()
        .max(ledger.state().epoch_manager.current_time_micros);
    commit(ledger.update_global_time(SYSTEM_CALLER, now))?;
    commit(ledger.trigger_epoch_transition(SYSTEM_CALLER))
}

pub fn commit<T: std::fmt::Debug>(receipt: TransactionReceipt<T>) -> Result<T, Error> {
    receipt.into_result().map_err(Error::TransactionFailed)
}

fn describe_outcome(outcome: &CrossChainEventOutcome) -> String {
    match outcome {
        CrossChainEventOutcome::ValidatorRegistered {
            identifier,
            validator,
        } => format!("{} registered validator {}", identifier, validator),
        CrossChainEventOutcome::StakeDeposited {
            identifier,
            validator,
            delegator,
            shares,
        } => format!(
            "{} minted {} shares of {} for {}",
            identifier, shares, validator, delegator
        ),
        CrossChainEventOutcome::Replayed { identifier } => {
            format!("{} already processed", identifier)
        }
        CrossChainEventOutcome::Ignored { issuer, reason } => {
            format!("ignored group from {}: {:?}", issuer, reason)
        }
    }
}
