use crate::types::*;

/// Status code returned by [`BlstVerifier`] for anything other than a valid signature.
pub const VERIFICATION_FAILURE: u8 = 0;

/// The BLS verification oracle consulted at registration. Implementations return a single status
/// byte; only [`VERIFICATION_SUCCESS`] counts as a valid proof.
pub trait SignatureVerifier {
    fn verify(
        &self,
        message: &[u8],
        signature: &Bls12381G2Signature,
        public_key: &Bls12381G1PublicKey,
    ) -> u8;
}

/// Verifies min-pk BLS12-381 signatures with `blst` under [`BLS12381_CIPHERSITE_V1`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlstVerifier;

impl SignatureVerifier for BlstVerifier {
    fn verify(
        &self,
        message: &[u8],
        signature: &Bls12381G2Signature,
        public_key: &Bls12381G1PublicKey,
    ) -> u8 {
        if let Ok(sig) = blst::min_pk::Signature::from_bytes(&signature.0) {
            if let Ok(pk) = blst::min_pk::PublicKey::from_bytes(&public_key.0) {
                let result = sig.verify(true, message, BLS12381_CIPHERSITE_V1, &[], &pk, true);

                return match result {
                    blst::BLST_ERROR::BLST_SUCCESS => VERIFICATION_SUCCESS,
                    _ => VERIFICATION_FAILURE,
                };
            }
        }

        VERIFICATION_FAILURE
    }
}

/// The message a vote-address proof of possession signs:
/// `hash(operator || vote_address || chain_id)`, the chain id in big-endian.
pub fn vote_address_proof_message(
    operator: &Address,
    vote_address: &Bls12381G1PublicKey,
    chain_id: u64,
) -> Hash {
    let mut preimage = Vec::with_capacity(Address::LENGTH + Bls12381G1PublicKey::LENGTH + 8);
    preimage.extend_from_slice(operator.as_ref());
    preimage.extend_from_slice(vote_address.as_ref());
    preimage.extend_from_slice(&chain_id.to_be_bytes());
    hash(preimage)
}
