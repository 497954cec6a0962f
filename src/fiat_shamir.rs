//! Fiat-Shamir transformation for Sigma protocols.
//!
//! [`NISigmaProtocol`] wraps an interactive Sigma protocol `P` and a codec
//! `C` into a non-interactive proof system. The codec's sponge is seeded
//! with the session identifier and the statement label at construction, so
//! every derived challenge is bound to
//! `(session, statement, commitment)`; prover and verifier must agree on
//! both inputs or challenge reconstruction fails.

use subtle::ConstantTimeEq;

use rand::{CryptoRng, RngCore};

use crate::codec::Codec;
use crate::errors::Error;
use crate::traits::SigmaProtocol;

type Transcript<P> = (
    <P as SigmaProtocol>::Commitment,
    <P as SigmaProtocol>::Challenge,
    <P as SigmaProtocol>::Response,
);

/// A non-interactive proof system obtained by applying Fiat-Shamir to a
/// Sigma protocol.
///
/// The stored codec holds the pristine session-bound transcript; each prove
/// or verify call works on its own clone, so one `NISigmaProtocol` value
/// supports any number of independent proofs while no sponge state is ever
/// reused across two of them.
pub struct NISigmaProtocol<P, C>
where
    P: SigmaProtocol,
    C: Codec<Challenge = P::Challenge> + Clone,
{
    /// Session- and statement-bound codec state.
    hash_state: C,
    /// Underlying Sigma protocol.
    sigmap: P,
}

impl<P, C> NISigmaProtocol<P, C>
where
    P: SigmaProtocol,
    C: Codec<Challenge = P::Challenge> + Clone,
{
    /// Create a proof system for `instance`, bound to the given session
    /// identifier.
    pub fn new(session_id: &[u8], instance: P) -> Result<Self, Error> {
        let label = instance.instance_label();
        let hash_state = C::from_transcript_label(session_id, &label)?;
        Ok(Self {
            hash_state,
            sigmap: instance,
        })
    }

    /// Create a proof system over a codec seeded with a raw initialization
    /// vector, bypassing the session binding. Mostly useful for tests and
    /// fixed-IV vector generation.
    pub fn from_iv(iv: &[u8], instance: P) -> Self {
        Self {
            hash_state: C::from_iv(iv),
            sigmap: instance,
        }
    }

    /// Run the interactive protocol against the transcript oracle, returning
    /// the full `(commitment, challenge, response)` transcript.
    ///
    /// The proof is verified locally before being returned.
    pub fn prove(
        &self,
        witness: &P::Witness,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Transcript<P>, Error> {
        let mut codec = self.hash_state.clone();

        let (commitment, prover_state) = self.sigmap.prover_commit(witness, rng)?;
        let data = self.sigmap.serialize_commitment(&commitment);
        let challenge = codec.prover_message(&data).verifier_challenge();
        let response = self.sigmap.prover_response(prover_state, &challenge)?;
        self.sigmap.verifier(&commitment, &challenge, &response)?;
        Ok((commitment, challenge, response))
    }

    /// Verify an interactive-style transcript against the bound session and
    /// statement.
    pub fn verify(
        &self,
        commitment: &P::Commitment,
        challenge: &P::Challenge,
        response: &P::Response,
    ) -> Result<(), Error> {
        let mut codec = self.hash_state.clone();

        let data = self.sigmap.serialize_commitment(commitment);
        let expected_challenge = codec.prover_message(&data).verifier_challenge();

        let given = self.sigmap.serialize_challenge(challenge);
        let expected = self.sigmap.serialize_challenge(&expected_challenge);
        if !bool::from(given.ct_eq(&expected)) {
            return Err(Error::VerificationFailure);
        }
        self.sigmap.verifier(commitment, challenge, response)
    }

    /// Produce proof bytes: `serialize(commitment) || serialize(response)`.
    pub fn prove_batchable(
        &self,
        witness: &P::Witness,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Vec<u8>, Error> {
        let (commitment, _challenge, response) = self.prove(witness, rng)?;
        let mut bytes = self.sigmap.serialize_commitment(&commitment);
        bytes.extend_from_slice(&self.sigmap.serialize_response(&response));
        Ok(bytes)
    }

    /// Verify proof bytes produced by [`Self::prove_batchable`].
    ///
    /// The commitment and response widths are derived from the statement
    /// shape; the challenge is reconstructed from the transcript.
    pub fn verify_batchable(&self, proof: &[u8]) -> Result<(), Error> {
        let commit_len = self.sigmap.commit_bytes_len();
        if proof.len() < commit_len {
            return Err(Error::MalformedInput {
                position: proof.len(),
            });
        }
        let (commitment_bytes, response_bytes) = proof.split_at(commit_len);
        let commitment = self.sigmap.deserialize_commitment(commitment_bytes)?;
        let response = self.sigmap.deserialize_response(response_bytes)?;

        let mut codec = self.hash_state.clone();
        let challenge = codec.prover_message(commitment_bytes).verifier_challenge();
        self.sigmap.verifier(&commitment, &challenge, &response)
    }
}
