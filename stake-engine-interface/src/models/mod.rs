//! JSON file models. Numbers that may exceed `u64` are carried as decimal strings and every byte
//! field is hex, with or without a `0x` prefix.

use crate::blueprints::cross_chain::*;
use crate::blueprints::validator_manager::GenesisValidatorSet;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid {field}[{index}]: {value}")]
    InvalidField {
        field: &'static str,
        index: usize,
        value: String,
    },
    #[error("invalid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

fn parse_each<T, F>(field: &'static str, values: &[String], parse: F) -> Result<Vec<T>, ModelError>
where
    F: Fn(&str) -> Option<T>,
{
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            parse(value).ok_or_else(|| ModelError::InvalidField {
                field,
                index,
                value: value.clone(),
            })
        })
        .collect()
}

fn decode_hex(value: &str) -> Option<Vec<u8>> {
    hex::decode(value.strip_prefix("0x").unwrap_or(value)).ok()
}

//=========
// genesis
//=========

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenesisConfig {
    #[serde(rename = "validatorAddresses")]
    pub validator_addresses: Vec<String>,
    #[serde(rename = "consensusPublicKeys", alias = "consensusAddresses")]
    pub consensus_public_keys: Vec<String>,
    #[serde(rename = "feeAddresses")]
    pub fee_addresses: Vec<String>,
    #[serde(rename = "votingPowers")]
    pub voting_powers: Vec<String>,
    #[serde(rename = "voteAddresses")]
    pub vote_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monikers: Vec<String>,
}

impl GenesisConfig {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses every field. Array lengths are not compared here; genesis itself rejects a
    /// mismatched set.
    pub fn to_validator_set(&self) -> Result<GenesisValidatorSet, ModelError> {
        Ok(GenesisValidatorSet {
            validator_addresses: parse_each("validatorAddresses", &self.validator_addresses, |v| {
                Address::from_str(v).ok()
            })?,
            consensus_public_keys: parse_each(
                "consensusPublicKeys",
                &self.consensus_public_keys,
                decode_hex,
            )?,
            fee_addresses: parse_each("feeAddresses", &self.fee_addresses, |v| {
                Address::from_str(v).ok()
            })?,
            voting_powers: parse_each("votingPowers", &self.voting_powers, |v| {
                u128::from_str(v).ok()
            })?,
            vote_addresses: parse_each("voteAddresses", &self.vote_addresses, |v| {
                Bls12381G1PublicKey::from_str(v).ok()
            })?,
            monikers: self.monikers.clone(),
        })
    }
}

//=============
// JWK batches
//=============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonJwk {
    pub variant: u8,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonProviderJwks {
    pub issuer: String,
    pub version: u64,
    pub jwks: Vec<JsonJwk>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonCrossChainParams {
    pub identifier: String,
    pub payload: String,
    #[serde(rename = "targetValidator")]
    pub target_validator: String,
    pub shares: String,
    #[serde(rename = "sourceBlockNumber")]
    pub source_block_number: u64,
    pub issuer: String,
}

/// One relay submission: the observed groups and their parallel params.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwkBatchFile {
    pub entries: Vec<JsonProviderJwks>,
    #[serde(default)]
    pub params: Vec<JsonCrossChainParams>,
}

impl JwkBatchFile {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the file form of a batch.
    pub fn from_batch(groups: &[ProviderJwks], params: &[CrossChainParams]) -> Self {
        Self {
            entries: groups
                .iter()
                .map(|group| JsonProviderJwks {
                    issuer: group.issuer.clone(),
                    version: group.version,
                    jwks: group
                        .jwks
                        .iter()
                        .map(|jwk| JsonJwk {
                            variant: jwk.variant,
                            data: format!("0x{}", hex::encode(&jwk.data)),
                        })
                        .collect(),
                })
                .collect(),
            params: params
                .iter()
                .map(|p| JsonCrossChainParams {
                    identifier: p.identifier.to_string(),
                    payload: format!("0x{}", hex::encode(&p.payload)),
                    target_validator: p.target_validator.to_string(),
                    shares: p.shares.to_string(),
                    source_block_number: p.source_block_number,
                    issuer: p.issuer.clone(),
                })
                .collect(),
        }
    }

    pub fn to_batch(&self) -> Result<(Vec<ProviderJwks>, Vec<CrossChainParams>), ModelError> {
        let groups = self
            .entries
            .iter()
            .map(|entry| {
                let data: Vec<String> = entry.jwks.iter().map(|j| j.data.clone()).collect();
                let data = parse_each("jwks.data", &data, decode_hex)?;
                Ok(ProviderJwks {
                    issuer: entry.issuer.clone(),
                    version: entry.version,
                    jwks: entry
                        .jwks
                        .iter()
                        .zip(data)
                        .map(|(jwk, data)| Jwk {
                            variant: jwk.variant,
                            data,
                        })
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let params = self
            .params
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let invalid = |field: &'static str, value: &str| ModelError::InvalidField {
                    field,
                    index,
                    value: value.to_owned(),
                };
                Ok(CrossChainParams {
                    identifier: Hash::from_str(&p.identifier)
                        .map_err(|_| invalid("identifier", &p.identifier))?,
                    payload: decode_hex(&p.payload).ok_or_else(|| invalid("payload", &p.payload))?,
                    target_validator: Address::from_str(&p.target_validator)
                        .map_err(|_| invalid("targetValidator", &p.target_validator))?,
                    shares: u128::from_str(&p.shares).map_err(|_| invalid("shares", &p.shares))?,
                    source_block_number: p.source_block_number,
                    issuer: p.issuer.clone(),
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        Ok((groups, params))
    }
}
