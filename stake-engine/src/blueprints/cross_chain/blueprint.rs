use super::CrossChainError;
use crate::blueprints::stake_credit::StakeCreditBlueprint;
use crate::blueprints::validator_manager::ValidatorManagerBlueprint;
use crate::errors::RuntimeError;
use crate::system::{LedgerState, StakingEvent, SystemApi};
use crate::types::*;

/// A group that qualifies for stake processing: exactly one entry, of a stake variant.
enum EligibleEntry<'a> {
    RegisterValidator(&'a Jwk),
    Stake(&'a Jwk),
}

impl<'a> EligibleEntry<'a> {
    fn classify(group: &'a ProviderJwks) -> Result<Self, IgnoredReason> {
        match group.jwks.as_slice() {
            [] => Err(IgnoredReason::Empty),
            [jwk] => match JwkVariant::from_u8(jwk.variant) {
                JwkVariant::StakeRegisterValidatorEvent => Ok(Self::RegisterValidator(jwk)),
                JwkVariant::StakeEvent => Ok(Self::Stake(jwk)),
                other => Err(IgnoredReason::NonStakeVariant(other)),
            },
            entries => Err(IgnoredReason::MultipleEntries(entries.len())),
        }
    }

    fn jwk(&self) -> &'a Jwk {
        match self {
            Self::RegisterValidator(jwk) | Self::Stake(jwk) => jwk,
        }
    }
}

pub struct CrossChainEventProcessorBlueprint;

impl CrossChainEventProcessorBlueprint {
    /// Admits a relay batch. `params[i]` accompanies `groups[i]`. Groups that are not a single
    /// stake entry are ignored, already-applied identifiers are skipped, and any other failure
    /// aborts the whole batch.
    pub fn process_batch<Y>(
        groups: &[ProviderJwks],
        params: &[CrossChainParams],
        api: &mut Y,
    ) -> Result<Vec<CrossChainEventOutcome>, RuntimeError>
    where
        Y: SystemApi,
    {
        api.require_caller(SYSTEM_CALLER)?;
        if groups.len() != params.len() {
            return Err(CrossChainError::BatchLengthMismatch {
                groups: groups.len(),
                params: params.len(),
            }
            .into());
        }

        let mut outcomes = Vec::with_capacity(groups.len());
        for (index, (group, params)) in groups.iter().zip(params).enumerate() {
            outcomes.push(Self::process_group(index, group, params, api)?);
        }

        Ok(outcomes)
    }

    fn process_group<Y>(
        index: usize,
        group: &ProviderJwks,
        params: &CrossChainParams,
        api: &mut Y,
    ) -> Result<CrossChainEventOutcome, RuntimeError>
    where
        Y: SystemApi,
    {
        let entry = match EligibleEntry::classify(group) {
            Ok(entry) => entry,
            Err(reason) => {
                debug!(issuer = %group.issuer, ?reason, "group ignored for staking");
                return Ok(CrossChainEventOutcome::Ignored {
                    issuer: group.issuer.clone(),
                    reason,
                });
            }
        };

        let identifier = params.identifier;
        if api.state().processed_events.is_processed(&identifier) {
            warn!(%identifier, "cross-chain event already processed");
            return Ok(CrossChainEventOutcome::Replayed { identifier });
        }

        let jwk = entry.jwk();
        if params.issuer != group.issuer {
            return Err(CrossChainError::IssuerMismatch {
                index,
                expected: group.issuer.clone(),
                actual: params.issuer.clone(),
            }
            .into());
        }
        if params.payload != jwk.data {
            return Err(CrossChainError::PayloadMismatch { index }.into());
        }

        let (variant, outcome) = match entry {
            EligibleEntry::RegisterValidator(jwk) => {
                let event = StakeRegisterValidatorEvent::from_payload(&jwk.data)
                    .map_err(|e| decode_failed(index, e))?;
                check_target(index, event.user, params.target_validator)?;

                let validator = ValidatorManagerBlueprint::register(
                    event.user,
                    event.params,
                    event.stake_amount,
                    api,
                )?;
                let minted = api
                    .state()
                    .stake_credit(&StakeCreditBlueprint::address_of(&validator))?
                    .share_balance(&validator);
                check_shares(index, params.shares, minted)?;

                (
                    StakeRegisterValidatorEvent::VARIANT,
                    CrossChainEventOutcome::ValidatorRegistered {
                        identifier,
                        validator,
                    },
                )
            }
            EligibleEntry::Stake(jwk) => {
                let event =
                    StakeEvent::from_payload(&jwk.data).map_err(|e| decode_failed(index, e))?;
                check_target(index, event.target_validator, params.target_validator)?;

                let shares = StakeCreditBlueprint::deposit_for(
                    event.target_validator,
                    event.user,
                    event.stake_amount,
                    api,
                )?;
                check_shares(index, params.shares, shares)?;

                (
                    StakeEvent::VARIANT,
                    CrossChainEventOutcome::StakeDeposited {
                        identifier,
                        validator: event.target_validator,
                        delegator: event.user,
                        shares,
                    },
                )
            }
        };

        api.state_mut().processed_events.mark_processed(identifier);
        info!(
            %identifier,
            ?variant,
            source_block_number = params.source_block_number,
            "cross-chain event admitted"
        );
        api.emit_event(StakingEvent::CrossChainEventAdmitted {
            identifier,
            variant,
            source_block_number: params.source_block_number,
        });

        Ok(outcome)
    }

    pub fn is_event_processed(state: &LedgerState, identifier: &Hash) -> bool {
        state.processed_events.is_processed(identifier)
    }
}

fn decode_failed(index: usize, error: sbor::DecodeError) -> CrossChainError {
    CrossChainError::PayloadDecodeFailed {
        index,
        reason: format!("{:?}", error),
    }
}

fn check_target(index: usize, expected: Address, actual: Address) -> Result<(), CrossChainError> {
    if expected != actual {
        return Err(CrossChainError::TargetMismatch {
            index,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_shares(index: usize, expected: u128, minted: u128) -> Result<(), CrossChainError> {
    if minted < expected {
        return Err(CrossChainError::InsufficientSharesMinted {
            index,
            expected,
            minted,
        });
    }
    Ok(())
}
