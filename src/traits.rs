//! The Sigma protocol interface.
//!
//! [`SigmaProtocol`] captures the three-move commit/challenge/response shape
//! together with the message (de)serialization the Fiat-Shamir layer needs.
//! Compositions implement the same trait, so the transform never distinguishes
//! a single Schnorr statement from an AND/OR bundle.

use rand::{CryptoRng, Rng, RngCore};

use crate::errors::Error;

/// A three-move Sigma protocol: commit, challenge, response.
pub trait SigmaProtocol {
    /// The prover's first message.
    type Commitment;
    /// Ephemeral prover data carried from commit to response; must be dropped
    /// on any failure path and never reused.
    type ProverState;
    /// The prover's second message.
    type Response;
    /// The secret knowledge being proven.
    type Witness;
    /// The verifier's challenge.
    type Challenge;

    /// First prover move: sample nonces and commit.
    fn prover_commit(
        &self,
        witness: &Self::Witness,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<(Self::Commitment, Self::ProverState), Error>;

    /// Second prover move: answer the challenge.
    fn prover_response(
        &self,
        state: Self::ProverState,
        challenge: &Self::Challenge,
    ) -> Result<Self::Response, Error>;

    /// Verifier decision over a full transcript.
    fn verifier(
        &self,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        response: &Self::Response,
    ) -> Result<(), Error>;

    fn serialize_commitment(&self, commitment: &Self::Commitment) -> Vec<u8>;

    fn serialize_challenge(&self, challenge: &Self::Challenge) -> Vec<u8>;

    fn serialize_response(&self, response: &Self::Response) -> Vec<u8>;

    fn deserialize_commitment(&self, data: &[u8]) -> Result<Self::Commitment, Error>;

    fn deserialize_challenge(&self, data: &[u8]) -> Result<Self::Challenge, Error>;

    fn deserialize_response(&self, data: &[u8]) -> Result<Self::Response, Error>;

    /// Width in bytes of the serialized commitment, derived from the
    /// statement shape. The Fiat-Shamir layer uses it to split proof bytes.
    fn commit_bytes_len(&self) -> usize;

    /// A digest binding the public statement; absorbed into the transcript
    /// before the first prover message.
    fn instance_label(&self) -> Vec<u8>;

    /// A 64-byte protocol identifier: an ASCII tag padded with NUL bytes.
    fn protocol_identifier(&self) -> [u8; 64];
}

/// Transcript simulation, required by disjunctive composition.
pub trait SigmaProtocolSimulator: SigmaProtocol {
    /// Sample a uniformly random response.
    fn simulate_response<R: Rng + CryptoRng>(&self, rng: &mut R) -> Self::Response;

    /// Recompute the unique commitment that makes `(commitment, challenge,
    /// response)` an accepting transcript.
    fn simulate_commitment(
        &self,
        challenge: &Self::Challenge,
        response: &Self::Response,
    ) -> Result<Self::Commitment, Error>;

    /// Produce a full accepting transcript without a witness.
    fn simulate_transcript<R: Rng + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::Commitment, Self::Challenge, Self::Response), Error>;
}
