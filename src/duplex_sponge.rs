//! Duplex-sponge challenge oracles for the Fiat-Shamir transform.
//!
//! Both variants wrap a fixed hash primitive in an absorb/squeeze interface.
//! They are transcript hashes, not general-purpose XOFs: their output is
//! determined by the ordered sequence of absorbs and squeezes since
//! construction, which is all the Fiat-Shamir layer needs.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Shake128};

/// A stateful absorb/squeeze oracle.
///
/// Zero-length absorbs and squeezes leave the externally observable
/// transcript unchanged. `Clone` forks the transcript state, as needed by
/// simulator-based protocol compositions.
pub trait DuplexSponge: Clone {
    /// Initialize the sponge from an initialization vector.
    fn new(iv: &[u8]) -> Self;

    /// Feed bytes into the transcript.
    fn absorb(&mut self, input: &[u8]);

    /// Produce `length` output bytes bound to everything absorbed and
    /// squeezed so far.
    fn squeeze(&mut self, length: usize) -> Vec<u8>;
}

/// SHAKE128-based sponge over an append-only transcript buffer.
///
/// `squeeze` hashes the whole transcript and then appends its own output to
/// it, so successive squeezes are domain-separated by prior output.
#[derive(Clone, Debug, Default)]
pub struct Shake128DuplexSponge {
    transcript: Vec<u8>,
}

impl DuplexSponge for Shake128DuplexSponge {
    fn new(iv: &[u8]) -> Self {
        Self {
            transcript: iv.to_vec(),
        }
    }

    fn absorb(&mut self, input: &[u8]) {
        self.transcript.extend_from_slice(input);
    }

    fn squeeze(&mut self, length: usize) -> Vec<u8> {
        let mut hasher = Shake128::default();
        hasher.update(&self.transcript);
        let mut output = vec![0u8; length];
        hasher.finalize_xof().read(&mut output);
        self.transcript.extend_from_slice(&output);
        output
    }
}

/// SHA3-256-based sponge with an explicit `(state, buffer)` pair.
///
/// `absorb` accumulates into the buffer; `squeeze` derives output by
/// iterated hashing of `state || buffer`, then compresses everything into
/// the next state and clears the buffer.
#[derive(Clone, Debug, Default)]
pub struct Keccak256DuplexSponge {
    state: Vec<u8>,
    buffer: Vec<u8>,
}

impl DuplexSponge for Keccak256DuplexSponge {
    fn new(iv: &[u8]) -> Self {
        Self {
            state: iv.to_vec(),
            buffer: Vec::new(),
        }
    }

    fn absorb(&mut self, input: &[u8]) {
        self.buffer.extend_from_slice(input);
    }

    fn squeeze(&mut self, length: usize) -> Vec<u8> {
        if length == 0 {
            return Vec::new();
        }

        let mut block = Sha3_256::new()
            .chain_update(&self.state)
            .chain_update(&self.buffer)
            .finalize();
        let mut output = Vec::with_capacity(length);
        while output.len() < length {
            output.extend_from_slice(block.as_slice());
            block = Sha3_256::digest(block.as_slice());
        }
        output.truncate(length);

        self.state = Sha3_256::new()
            .chain_update(&self.state)
            .chain_update(&self.buffer)
            .chain_update(&output)
            .finalize()
            .as_slice()
            .to_vec();
        self.buffer.clear();
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_contract<S: DuplexSponge>() {
        // determinism
        let mut a = S::new(b"iv");
        let mut b = S::new(b"iv");
        a.absorb(b"msg");
        b.absorb(b"msg");
        assert_eq!(a.squeeze(32), b.squeeze(32));

        // the IV separates transcripts
        let mut c = S::new(b"other iv");
        c.absorb(b"msg");
        assert_ne!(a.squeeze(32), c.squeeze(32));

        // empty absorbs are no-ops
        let mut plain = S::new(b"iv");
        plain.absorb(b"msg");
        let mut padded = S::new(b"iv");
        padded.absorb(b"");
        padded.absorb(b"msg");
        padded.absorb(b"");
        assert_eq!(plain.squeeze(32), padded.squeeze(32));

        // zero-length squeezes are no-ops
        let mut plain = S::new(b"iv");
        plain.absorb(b"msg");
        let mut zeroed = S::new(b"iv");
        zeroed.absorb(b"msg");
        assert!(zeroed.squeeze(0).is_empty());
        assert_eq!(plain.squeeze(32), zeroed.squeeze(32));

        // prior squeezes separate later output
        let mut first = S::new(b"iv");
        first.absorb(b"msg");
        let out1 = first.squeeze(16);
        first.absorb(b"more");
        let out2 = first.squeeze(16);
        assert_ne!(out1, out2);

        // clone forks the transcript
        let mut original = S::new(b"iv");
        original.absorb(b"msg");
        let mut fork = original.clone();
        assert_eq!(original.squeeze(24), fork.squeeze(24));

        // output spanning several hash blocks is well-defined
        let mut wide = S::new(b"iv");
        wide.absorb(&[0x01; 100]);
        assert_eq!(wide.squeeze(64).len(), 64);
    }

    #[test]
    fn shake128_contract() {
        check_contract::<Shake128DuplexSponge>();
    }

    #[test]
    fn keccak256_contract() {
        check_contract::<Keccak256DuplexSponge>();
    }
}
