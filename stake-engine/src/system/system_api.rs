use super::{LedgerState, StakingEvent};
use crate::crypto::SignatureVerifier;
use crate::errors::{AuthError, RuntimeError};
use crate::types::*;

/// The interface blueprints use to reach the ledger from inside a transaction.
pub trait SystemApi {
    /// The identity the transaction is executed as.
    fn caller(&self) -> Address;

    fn chain_id(&self) -> u64;

    fn state(&self) -> &LedgerState;

    fn state_mut(&mut self) -> &mut LedgerState;

    fn emit_event(&mut self, event: StakingEvent);

    /// Consults the BLS verification oracle.
    fn verify_signature(
        &self,
        message: &[u8],
        signature: &Bls12381G2Signature,
        public_key: &Bls12381G1PublicKey,
    ) -> u8;

    fn require_caller(&self, expected: Address) -> Result<(), RuntimeError> {
        let actual = self.caller();
        if actual != expected {
            return Err(AuthError::Unauthorized { expected, actual }.into());
        }
        Ok(())
    }
}

/// A transaction in flight: a private copy of the ledger state plus the events emitted so far.
pub struct StagedTransaction<'a> {
    caller: Address,
    chain_id: u64,
    state: LedgerState,
    events: Vec<StakingEvent>,
    verifier: &'a dyn SignatureVerifier,
}

impl<'a> StagedTransaction<'a> {
    pub(crate) fn new(
        caller: Address,
        chain_id: u64,
        state: LedgerState,
        verifier: &'a dyn SignatureVerifier,
    ) -> Self {
        Self {
            caller,
            chain_id,
            state,
            events: Vec::new(),
            verifier,
        }
    }

    pub(crate) fn into_parts(self) -> (LedgerState, Vec<StakingEvent>) {
        (self.state, self.events)
    }
}

impl<'a> SystemApi for StagedTransaction<'a> {
    fn caller(&self) -> Address {
        self.caller
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn state(&self) -> &LedgerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LedgerState {
        &mut self.state
    }

    fn emit_event(&mut self, event: StakingEvent) {
        self.events.push(event);
    }

    fn verify_signature(
        &self,
        message: &[u8],
        signature: &Bls12381G2Signature,
        public_key: &Bls12381G1PublicKey,
    ) -> u8 {
        self.verifier.verify(message, signature, public_key)
    }
}
