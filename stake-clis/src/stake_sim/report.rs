use serde::{Deserialize, Serialize};
use stake_engine::prelude::*;
use crate::stake_sim::Error;

/// JSON snapshot of the validator set, written by `simulate --output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSetReport {
    pub epoch: u64,
    #[serde(rename = "totalVotingPower")]
    pub total_voting_power: String,
    pub validators: Vec<ValidatorReport>,
    #[serde(rename = "processedEvents")]
    pub processed_events: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorReport {
    pub address: String,
    pub status: String,
    pub moniker: String,
    #[serde(rename = "votingPower")]
    pub voting_power: String,
    pub commission: u64,
}

impl ValidatorSetReport {
    pub fn from_ledger(ledger: &StakingLedger) -> Result<Self, Error> {
        let set = ledger.validator_set().map_err(Error::LedgerReadError)?;
        let validators = set
            .active
            .iter()
            .chain(&set.pending_active)
            .chain(&set.pending_inactive)
            .filter_map(|entry| {
                let info = ledger.validator_info(&entry.validator)?;
                Some(ValidatorReport {
                    address: entry.validator.to_string(),
                    status: info.status.to_string(),
                    moniker: info.moniker,
                    voting_power: entry.voting_power.to_string(),
                    commission: info.commission.rate,
                })
            })
            .collect();

        Ok(Self {
            epoch: ledger.current_epoch_info().epoch.number(),
            total_voting_power: set.total_voting_power.to_string(),
            validators,
            processed_events: ledger.state().processed_events.len(),
        })
    }
}
