mod cmd_new_stake_batch;
mod cmd_show_genesis;
mod cmd_simulate;
mod config;
mod error;
mod report;

pub use cmd_new_stake_batch::*;
pub use cmd_show_genesis::*;
pub use cmd_simulate::*;
pub use config::*;
pub use error::*;
pub use report::*;

use clap::{Parser, Subcommand};
use stake_engine::prelude::*;
use std::path::Path;
use tracing::Level;

/// Drive the staking engine from genesis and relay batch files
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, name = "stake-sim")]
pub struct StakeSimCli {
    /// Enable debug logging
    #[clap(short, long, global = true)]
    pub debug: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Simulate(Simulate),
    ShowGenesis(ShowGenesis),
    NewStakeBatch(NewStakeBatch),
}

pub fn run() -> Result<(), Error> {
    let cli = StakeSimCli::parse();
    init_logging(cli.debug);

    let mut out = std::io::stdout();
    match cli.command {
        Command::Simulate(cmd) => cmd.run(&mut out),
        Command::ShowGenesis(cmd) => cmd.run(&mut out),
        Command::NewStakeBatch(cmd) => cmd.run(&mut out),
    }
}

/// Installs the global subscriber. Logs go to stderr so command output stays parseable.
pub fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

pub fn load_genesis(path: &Path) -> Result<GenesisValidatorSet, Error> {
    let content = std::fs::read_to_string(path).map_err(Error::IOError)?;
    let config = GenesisConfig::from_json(&content).map_err(Error::ModelError)?;
    config.to_validator_set().map_err(Error::ModelError)
}

pub fn load_batch(path: &Path) -> Result<(Vec<ProviderJwks>, Vec<CrossChainParams>), Error> {
    let content = std::fs::read_to_string(path).map_err(Error::IOError)?;
    JwkBatchFile::from_json(&content)
        .and_then(|file| file.to_batch())
        .map_err(Error::ModelError)
}

pub fn write_validator_set<O: std::io::Write>(
    out: &mut O,
    ledger: &StakingLedger,
) -> Result<(), Error> {
    let set = ledger.validator_set().map_err(Error::LedgerReadError)?;
    let info = ledger.current_epoch_info();
    writeln!(
        out,
        "Epoch {} | active {} | total voting power {}",
        info.epoch,
        set.active.len(),
        set.total_voting_power
    )
    .map_err(Error::IOError)?;

    let sections = [
        (ValidatorStatus::Active, &set.active),
        (ValidatorStatus::PendingActive, &set.pending_active),
        (ValidatorStatus::PendingInactive, &set.pending_inactive),
    ];
    for (status, entries) in sections {
        for entry in entries {
            let moniker = ledger
                .validator_info(&entry.validator)
                .map(|info| info.moniker)
                .unwrap_or_default();
            writeln!(
                out,
                "  {:<16} {} {:<9} {}",
                status, entry.validator, moniker, entry.voting_power
            )
            .map_err(Error::IOError)?;
        }
    }
    Ok(())
}
