//! Codecs bridging protocol messages and the duplex-sponge transcript.
//!
//! A codec owns the sponge for one proof session. Construction binds the
//! transcript to a `(session_id, instance_label)` pair; prover messages are
//! absorbed as group-element batch encodings; challenges are squeezed with a
//! 16-byte surplus and reduced modulo the scalar-field order, which keeps the
//! statistical distance from uniform below `2^-128`.

use core::marker::PhantomData;

use crate::duplex_sponge::DuplexSponge;
use crate::errors::Error;
use crate::group::{Group, ScalarField};

/// Convert a non-negative integer to a big-endian octet string of `length` bytes.
pub fn i2osp(value: usize, length: usize) -> Result<Vec<u8>, Error> {
    if length < core::mem::size_of::<usize>() {
        let bound = 1usize
            .checked_shl(8 * length as u32)
            .ok_or(Error::OutOfRange("octet string length"))?;
        if value >= bound {
            return Err(Error::OutOfRange("integer too large for octet string"));
        }
    }
    let be = value.to_be_bytes();
    let mut out = vec![0u8; length.saturating_sub(be.len())];
    out.extend_from_slice(&be[be.len().saturating_sub(length)..]);
    Ok(out)
}

/// The transcript interface the Fiat-Shamir layer drives.
pub trait Codec: Clone {
    /// The challenge type squeezed out of the transcript.
    type Challenge;

    /// Construct a codec over a sponge seeded with a raw initialization vector.
    fn from_iv(iv: &[u8]) -> Self;

    /// Construct a codec bound to a session and statement, seeding the sponge
    /// with `len(session_id) || session_id || len(instance_label) || instance_label`
    /// (4-byte big-endian length prefixes).
    fn from_transcript_label(session_id: &[u8], instance_label: &[u8]) -> Result<Self, Error> {
        let mut iv = i2osp(session_id.len(), 4)?;
        iv.extend_from_slice(session_id);
        iv.extend_from_slice(&i2osp(instance_label.len(), 4)?);
        iv.extend_from_slice(instance_label);
        Ok(Self::from_iv(&iv))
    }

    /// Absorb a serialized prover message.
    fn prover_message(&mut self, data: &[u8]) -> &mut Self;

    /// Squeeze the next verifier challenge.
    fn verifier_challenge(&mut self) -> Self::Challenge;
}

/// Byte-oriented codec for Schnorr-style proofs over a group `G`.
///
/// Composed commitments reach [`Codec::prover_message`] already flattened
/// into sub-proof order by the composite's commitment serialization, so the
/// same codec serves single statements and AND bundles alike.
#[derive(Clone, Debug)]
pub struct ByteSchnorrCodec<G, S>
where
    G: Group,
    S: DuplexSponge,
{
    sponge: S,
    _group: PhantomData<G>,
}

impl<G, S> Codec for ByteSchnorrCodec<G, S>
where
    G: Group,
    S: DuplexSponge,
{
    type Challenge = G::Scalar;

    fn from_iv(iv: &[u8]) -> Self {
        Self {
            sponge: S::new(iv),
            _group: PhantomData,
        }
    }

    fn prover_message(&mut self, data: &[u8]) -> &mut Self {
        self.sponge.absorb(data);
        self
    }

    fn verifier_challenge(&mut self) -> G::Scalar {
        let uniform = self
            .sponge
            .squeeze(G::Scalar::scalar_byte_length() + 16);
        G::Scalar::from_uniform_bytes(&uniform)
    }
}
