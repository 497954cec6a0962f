//! The generic Schnorr Sigma protocol over a [`Group`].
//!
//! [`SchnorrProof`] proves knowledge of a preimage under the linear morphism
//! of an [`Instance`], which covers discrete logarithms, DLEQ and Pedersen
//! commitment openings through one abstraction (see
//! [Maurer09](https://crypto-test.ethz.ch/publications/files/Maurer09.pdf)).

use rand::{CryptoRng, Rng, RngCore};

use crate::errors::Error;
use crate::group::{Group, ScalarField};
use crate::linear_relation::Instance;
use crate::serialization::{
    deserialize_elements, deserialize_scalars, serialize_elements, serialize_scalars,
};
use crate::traits::{SigmaProtocol, SigmaProtocolSimulator};

/// A Schnorr protocol proving knowledge of a witness for a linear group relation.
///
/// For a statement `φ(w) = x` the three moves are: commit to `T = φ(r)` for
/// fresh nonces `r`, receive a challenge `e`, answer `z = r + w·e`; the
/// verifier accepts iff `φ(z) = T + e·x` component-wise.
#[derive(Clone, Debug)]
pub struct SchnorrProof<G: Group>(pub Instance<G>);

impl<G: Group> SchnorrProof<G> {
    pub fn witness_length(&self) -> usize {
        self.0.num_scalars()
    }

    pub fn commitment_length(&self) -> usize {
        self.0.num_constraints()
    }
}

impl<G: Group> From<Instance<G>> for SchnorrProof<G> {
    fn from(value: Instance<G>) -> Self {
        Self(value)
    }
}

impl<G: Group> SigmaProtocol for SchnorrProof<G> {
    type Commitment = Vec<G>;
    type ProverState = (Vec<<G as Group>::Scalar>, Vec<<G as Group>::Scalar>);
    type Response = Vec<<G as Group>::Scalar>;
    type Witness = Vec<<G as Group>::Scalar>;
    type Challenge = <G as Group>::Scalar;

    /// Prover's first message: commit to fresh random nonces.
    ///
    /// Returns the commitment `φ(r)` together with the `(nonces, witness)`
    /// prover state consumed by [`Self::prover_response`].
    ///
    /// # Errors
    /// - [`Error::InvalidInstanceWitnessPair`] if the witness length is
    ///   incorrect, or the statement is trivial (all-identity image).
    fn prover_commit(
        &self,
        witness: &Self::Witness,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<(Self::Commitment, Self::ProverState), Error> {
        if witness.len() != self.witness_length() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        // Refuse to prove a statement with no content.
        if self.0.image().iter().all(|x| *x == G::identity()) {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        let nonces: Vec<G::Scalar> = (0..self.witness_length())
            .map(|_| G::Scalar::random(rng))
            .collect();
        let commitment = self.0.linear_map().evaluate(&nonces)?;
        let prover_state = (nonces, witness.clone());
        Ok((commitment, prover_state))
    }

    /// Computes the prover's response `z[i] = r[i] + w[i]·e`.
    fn prover_response(
        &self,
        prover_state: Self::ProverState,
        challenge: &Self::Challenge,
    ) -> Result<Self::Response, Error> {
        let (nonces, witness) = prover_state;

        if nonces.len() != self.witness_length() || witness.len() != self.witness_length() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        let responses = nonces
            .into_iter()
            .zip(witness)
            .map(|(r, w)| r + w * challenge.clone())
            .collect();
        Ok(responses)
    }

    /// Accepts iff `φ(z) == T + e·x` holds for every constraint.
    ///
    /// # Errors
    /// - [`Error::InvalidInstanceWitnessPair`] if the commitment or response
    ///   length is incorrect.
    /// - [`Error::VerificationFailure`] if the relation does not hold.
    fn verifier(
        &self,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        response: &Self::Response,
    ) -> Result<(), Error> {
        if commitment.len() != self.commitment_length() || response.len() != self.witness_length() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        let lhs = self.0.linear_map().evaluate(response)?;
        let rhs: Vec<G> = commitment
            .iter()
            .zip(self.0.image())
            .map(|(t, x)| t.clone() + x.clone() * challenge.clone())
            .collect();
        if lhs == rhs {
            Ok(())
        } else {
            Err(Error::VerificationFailure)
        }
    }

    fn serialize_commitment(&self, commitment: &Self::Commitment) -> Vec<u8> {
        serialize_elements(commitment)
    }

    fn serialize_challenge(&self, challenge: &Self::Challenge) -> Vec<u8> {
        serialize_scalars::<G>(std::slice::from_ref(challenge))
    }

    fn serialize_response(&self, response: &Self::Response) -> Vec<u8> {
        serialize_scalars::<G>(response)
    }

    /// Reconstructs the commitment vector; the expected element count is the
    /// number of constraints of the underlying relation.
    fn deserialize_commitment(&self, data: &[u8]) -> Result<Self::Commitment, Error> {
        deserialize_elements::<G>(data, self.commitment_length())
    }

    fn deserialize_challenge(&self, data: &[u8]) -> Result<Self::Challenge, Error> {
        let scalars = deserialize_scalars::<G>(data, 1)?;
        scalars.into_iter().next().ok_or(Error::VerificationFailure)
    }

    /// Reconstructs the response vector; the expected scalar count is the
    /// number of witness variables.
    fn deserialize_response(&self, data: &[u8]) -> Result<Self::Response, Error> {
        deserialize_scalars::<G>(data, self.witness_length())
    }

    fn commit_bytes_len(&self) -> usize {
        self.0.commit_bytes_len()
    }

    fn instance_label(&self) -> Vec<u8> {
        self.0.label().to_vec()
    }

    fn protocol_identifier(&self) -> [u8; 64] {
        let mut id = [0u8; 64];
        id[..32].copy_from_slice(b"ietf sigma proof linear relation");
        id
    }
}

impl<G: Group> SigmaProtocolSimulator for SchnorrProof<G> {
    /// Samples a uniformly random response vector.
    fn simulate_response<R: Rng + CryptoRng>(&self, rng: &mut R) -> Self::Response {
        (0..self.witness_length())
            .map(|_| G::Scalar::random(rng))
            .collect()
    }

    /// Simulates a full accepting transcript for a random challenge.
    fn simulate_transcript<R: Rng + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::Commitment, Self::Challenge, Self::Response), Error> {
        let challenge = G::Scalar::random(rng);
        let response = self.simulate_response(rng);
        let commitment = self.simulate_commitment(&challenge, &response)?;
        Ok((commitment, challenge, response))
    }

    /// Recomputes the commitment `φ(z) − e·x` that makes `(e, z)` accept.
    fn simulate_commitment(
        &self,
        challenge: &Self::Challenge,
        response: &Self::Response,
    ) -> Result<Self::Commitment, Error> {
        if response.len() != self.witness_length() {
            return Err(Error::InvalidInstanceWitnessPair);
        }

        let response_image = self.0.linear_map().evaluate(response)?;
        let commitment = response_image
            .into_iter()
            .zip(self.0.image())
            .map(|(res, img)| res - img.clone() * challenge.clone())
            .collect();
        Ok(commitment)
    }
}
