//! Conjunction and disjunction of Sigma protocols.
//!
//! Both composites expose the same [`SigmaProtocol`] surface as a single
//! [`SchnorrProof`], so the Fiat-Shamir layer drives them without knowing
//! they are compositions.
//!
//! - [`AndProof`] proves knowledge of witnesses for *all* sub-statements
//!   under one shared challenge.
//! - [`OrProof`] proves knowledge of a witness for *at least one*
//!   sub-statement with the Cramer-Damgård-Schoenmakers challenge split:
//!   every simulated branch picks its own challenge, and the real branch
//!   answers `e_j = e - Σ_{i≠j} e_i`.

use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use crate::errors::Error;
use crate::group::{Group, ScalarField};
use crate::linear_relation::Instance;
use crate::schnorr_protocol::SchnorrProof;
use crate::serialization::{deserialize_scalars, serialize_scalars};
use crate::traits::{SigmaProtocol, SigmaProtocolSimulator};

/// AND composition: a bundle of statements proven under one challenge.
#[derive(Clone, Debug)]
pub struct AndProof<G: Group> {
    protocols: Vec<SchnorrProof<G>>,
}

impl<G: Group> AndProof<G> {
    /// Bundle the given statements, in declaration order.
    pub fn new(instances: impl IntoIterator<Item = Instance<G>>) -> Self {
        Self {
            protocols: instances.into_iter().map(SchnorrProof).collect(),
        }
    }

    /// The sub-protocols, in declaration order.
    pub fn protocols(&self) -> &[SchnorrProof<G>] {
        &self.protocols
    }
}

impl<G: Group> SigmaProtocol for AndProof<G> {
    type Commitment = Vec<Vec<G>>;
    type ProverState = Vec<<SchnorrProof<G> as SigmaProtocol>::ProverState>;
    type Response = Vec<Vec<<G as Group>::Scalar>>;
    type Witness = Vec<Vec<<G as Group>::Scalar>>;
    type Challenge = <G as Group>::Scalar;

    fn prover_commit(
        &self,
        witness: &Self::Witness,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<(Self::Commitment, Self::ProverState), Error> {
        if witness.len() != self.protocols.len() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        let mut commitments = Vec::with_capacity(self.protocols.len());
        let mut prover_states = Vec::with_capacity(self.protocols.len());
        for (sub, sub_witness) in self.protocols.iter().zip(witness) {
            let (commitment, state) = sub.prover_commit(sub_witness, rng)?;
            commitments.push(commitment);
            prover_states.push(state);
        }
        Ok((commitments, prover_states))
    }

    /// Answers the shared challenge in every sub-protocol.
    fn prover_response(
        &self,
        prover_state: Self::ProverState,
        challenge: &Self::Challenge,
    ) -> Result<Self::Response, Error> {
        if prover_state.len() != self.protocols.len() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        self.protocols
            .iter()
            .zip(prover_state)
            .map(|(sub, state)| sub.prover_response(state, challenge))
            .collect()
    }

    /// Accepts iff every sub-proof accepts under the shared challenge.
    fn verifier(
        &self,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        response: &Self::Response,
    ) -> Result<(), Error> {
        if commitment.len() != self.protocols.len() || response.len() != self.protocols.len() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        for ((sub, sub_commitment), sub_response) in
            self.protocols.iter().zip(commitment).zip(response)
        {
            sub.verifier(sub_commitment, challenge, sub_response)?;
        }
        Ok(())
    }

    fn serialize_commitment(&self, commitment: &Self::Commitment) -> Vec<u8> {
        self.protocols
            .iter()
            .zip(commitment)
            .flat_map(|(sub, c)| sub.serialize_commitment(c))
            .collect()
    }

    fn serialize_challenge(&self, challenge: &Self::Challenge) -> Vec<u8> {
        serialize_scalars::<G>(std::slice::from_ref(challenge))
    }

    fn serialize_response(&self, response: &Self::Response) -> Vec<u8> {
        self.protocols
            .iter()
            .zip(response)
            .flat_map(|(sub, r)| sub.serialize_response(r))
            .collect()
    }

    /// Splits the data by each sub-statement's fixed commitment width.
    fn deserialize_commitment(&self, data: &[u8]) -> Result<Self::Commitment, Error> {
        let widths: Vec<usize> = self.protocols.iter().map(|sub| sub.commit_bytes_len()).collect();
        let chunks = split_exact(data, &widths)?;
        self.protocols
            .iter()
            .zip(chunks)
            .map(|(sub, chunk)| sub.deserialize_commitment(chunk))
            .collect()
    }

    fn deserialize_challenge(&self, data: &[u8]) -> Result<Self::Challenge, Error> {
        let scalars = deserialize_scalars::<G>(data, 1)?;
        scalars.into_iter().next().ok_or(Error::VerificationFailure)
    }

    /// Splits the data by each sub-statement's fixed response width.
    fn deserialize_response(&self, data: &[u8]) -> Result<Self::Response, Error> {
        let widths: Vec<usize> = self
            .protocols
            .iter()
            .map(|sub| sub.0.response_bytes_len())
            .collect();
        let chunks = split_exact(data, &widths)?;
        self.protocols
            .iter()
            .zip(chunks)
            .map(|(sub, chunk)| sub.deserialize_response(chunk))
            .collect()
    }

    fn commit_bytes_len(&self) -> usize {
        self.protocols.iter().map(|sub| sub.commit_bytes_len()).sum()
    }

    fn instance_label(&self) -> Vec<u8> {
        composite_label(b"AND_PROOF", &self.protocols)
    }

    fn protocol_identifier(&self) -> [u8; 64] {
        let mut id = [0u8; 64];
        id[..32].copy_from_slice(b"ietf sigma proof and composition");
        id
    }
}

/// OR composition: knowledge of a witness for one of several statements.
///
/// The witness is `(index, scalars)`: the position of the statement actually
/// known, and its witness vector. The resulting proof does not reveal the
/// index.
#[derive(Clone, Debug)]
pub struct OrProof<G: Group> {
    protocols: Vec<SchnorrProof<G>>,
}

/// Prover state for [`OrProof`]: the real branch's nonces next to the
/// pre-simulated transcripts of every other branch.
pub struct OrProverState<G: Group> {
    known_index: usize,
    real_state: <SchnorrProof<G> as SigmaProtocol>::ProverState,
    /// `(challenge, response)` per simulated branch; `None` at `known_index`.
    simulated: Vec<Option<(<G as Group>::Scalar, Vec<<G as Group>::Scalar>)>>,
}

impl<G: Group> OrProof<G> {
    /// Bundle the given statements, in declaration order.
    pub fn new(instances: impl IntoIterator<Item = Instance<G>>) -> Self {
        Self {
            protocols: instances.into_iter().map(SchnorrProof).collect(),
        }
    }

    /// The sub-protocols, in declaration order.
    pub fn protocols(&self) -> &[SchnorrProof<G>] {
        &self.protocols
    }
}

impl<G: Group> SigmaProtocol for OrProof<G> {
    type Commitment = Vec<Vec<G>>;
    type ProverState = OrProverState<G>;
    /// The first `k-1` branch challenges, then all `k` branch responses.
    type Response = (Vec<<G as Group>::Scalar>, Vec<Vec<<G as Group>::Scalar>>);
    type Witness = (usize, Vec<<G as Group>::Scalar>);
    type Challenge = <G as Group>::Scalar;

    /// Commits for real on the known branch and simulates every other branch
    /// with a self-chosen challenge.
    fn prover_commit(
        &self,
        witness: &Self::Witness,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<(Self::Commitment, Self::ProverState), Error> {
        let (known_index, scalars) = witness;
        if *known_index >= self.protocols.len() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        let mut commitments = Vec::with_capacity(self.protocols.len());
        let mut simulated = Vec::with_capacity(self.protocols.len());
        let mut real_state = None;
        for (i, sub) in self.protocols.iter().enumerate() {
            if i == *known_index {
                let (commitment, state) = sub.prover_commit(scalars, rng)?;
                commitments.push(commitment);
                simulated.push(None);
                real_state = Some(state);
            } else {
                let (commitment, challenge, response) = sub.simulate_transcript(rng)?;
                commitments.push(commitment);
                simulated.push(Some((challenge, response)));
            }
        }

        let real_state = real_state.ok_or(Error::InvalidInstanceWitnessPair)?;
        Ok((
            commitments,
            OrProverState {
                known_index: *known_index,
                real_state,
                simulated,
            },
        ))
    }

    /// Answers the shared challenge: the real branch gets
    /// `e_j = e - Σ_{i≠j} e_i`, simulated branches keep their own challenge.
    fn prover_response(
        &self,
        prover_state: Self::ProverState,
        challenge: &Self::Challenge,
    ) -> Result<Self::Response, Error> {
        let OrProverState {
            known_index,
            real_state,
            simulated,
        } = prover_state;
        if simulated.len() != self.protocols.len() || known_index >= self.protocols.len() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        let mut real_challenge = challenge.clone();
        for (branch_challenge, _) in simulated.iter().flatten() {
            real_challenge = real_challenge - branch_challenge.clone();
        }
        let real_response =
            self.protocols[known_index].prover_response(real_state, &real_challenge)?;

        let mut challenges = Vec::with_capacity(self.protocols.len());
        let mut responses = Vec::with_capacity(self.protocols.len());
        for (i, slot) in simulated.into_iter().enumerate() {
            match slot {
                None => {
                    challenges.push(real_challenge.clone());
                    responses.push(real_response.clone());
                }
                Some((branch_challenge, branch_response)) => {
                    debug_assert_ne!(i, known_index);
                    challenges.push(branch_challenge);
                    responses.push(branch_response);
                }
            }
        }
        // The last branch challenge is implied by the shared challenge.
        challenges.pop();
        Ok((challenges, responses))
    }

    /// Reconstructs the last branch challenge as `e - Σ e_i` and checks every
    /// branch transcript, so the challenges necessarily sum to `e`.
    fn verifier(
        &self,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        response: &Self::Response,
    ) -> Result<(), Error> {
        let (partial_challenges, responses) = response;
        let count = self.protocols.len();
        if count == 0
            || commitment.len() != count
            || responses.len() != count
            || partial_challenges.len() != count - 1
        {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        let mut last_challenge = challenge.clone();
        for branch_challenge in partial_challenges {
            last_challenge = last_challenge - branch_challenge.clone();
        }
        let challenges = partial_challenges
            .iter()
            .cloned()
            .chain(core::iter::once(last_challenge));

        for ((sub, branch_challenge), (sub_commitment, sub_response)) in self
            .protocols
            .iter()
            .zip(challenges)
            .zip(commitment.iter().zip(responses))
        {
            sub.verifier(sub_commitment, &branch_challenge, sub_response)?;
        }
        Ok(())
    }

    fn serialize_commitment(&self, commitment: &Self::Commitment) -> Vec<u8> {
        self.protocols
            .iter()
            .zip(commitment)
            .flat_map(|(sub, c)| sub.serialize_commitment(c))
            .collect()
    }

    fn serialize_challenge(&self, challenge: &Self::Challenge) -> Vec<u8> {
        serialize_scalars::<G>(std::slice::from_ref(challenge))
    }

    fn serialize_response(&self, response: &Self::Response) -> Vec<u8> {
        let (partial_challenges, responses) = response;
        let mut bytes = serialize_scalars::<G>(partial_challenges);
        for (sub, sub_response) in self.protocols.iter().zip(responses) {
            bytes.extend_from_slice(&sub.serialize_response(sub_response));
        }
        bytes
    }

    fn deserialize_commitment(&self, data: &[u8]) -> Result<Self::Commitment, Error> {
        let widths: Vec<usize> = self.protocols.iter().map(|sub| sub.commit_bytes_len()).collect();
        let chunks = split_exact(data, &widths)?;
        self.protocols
            .iter()
            .zip(chunks)
            .map(|(sub, chunk)| sub.deserialize_commitment(chunk))
            .collect()
    }

    fn deserialize_challenge(&self, data: &[u8]) -> Result<Self::Challenge, Error> {
        let scalars = deserialize_scalars::<G>(data, 1)?;
        scalars.into_iter().next().ok_or(Error::VerificationFailure)
    }

    fn deserialize_response(&self, data: &[u8]) -> Result<Self::Response, Error> {
        let count = self.protocols.len();
        if count == 0 {
            return Err(Error::InvalidInstanceWitnessPair);
        }
        let challenge_width = (count - 1) * <G::Scalar as ScalarField>::scalar_byte_length();
        let mut widths = vec![challenge_width];
        widths.extend(self.protocols.iter().map(|sub| sub.0.response_bytes_len()));
        let chunks = split_exact(data, &widths)?;

        let partial_challenges = deserialize_scalars::<G>(chunks[0], count - 1)?;
        let responses = self
            .protocols
            .iter()
            .zip(&chunks[1..])
            .map(|(sub, chunk)| sub.deserialize_response(chunk))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok((partial_challenges, responses))
    }

    fn commit_bytes_len(&self) -> usize {
        self.protocols.iter().map(|sub| sub.commit_bytes_len()).sum()
    }

    fn instance_label(&self) -> Vec<u8> {
        composite_label(b"OR_PROOF", &self.protocols)
    }

    fn protocol_identifier(&self) -> [u8; 64] {
        let mut id = [0u8; 64];
        id[..31].copy_from_slice(b"ietf sigma proof or composition");
        id
    }
}

/// SHA-256 over an ASCII tag followed by the sub-statement labels in
/// declaration order.
fn composite_label<G: Group>(tag: &[u8], protocols: &[SchnorrProof<G>]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(tag);
    for sub in protocols {
        hasher.update(sub.instance_label());
    }
    hasher.finalize().as_slice().to_vec()
}

/// Split `data` into consecutive chunks of the given widths, rejecting
/// trailing bytes.
fn split_exact<'a>(data: &'a [u8], widths: &[usize]) -> Result<Vec<&'a [u8]>, Error> {
    let expected: usize = widths.iter().sum();
    if data.len() != expected {
        return Err(Error::MalformedInput {
            position: data.len(),
        });
    }
    let mut chunks = Vec::with_capacity(widths.len());
    let mut offset = 0;
    for &width in widths {
        chunks.push(&data[offset..offset + width]);
        offset += width;
    }
    Ok(chunks)
}
