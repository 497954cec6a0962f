//! Prime-order groups and their scalar fields.
//!
//! The [`Group`] and [`ScalarField`] traits are the capability bundles the
//! rest of the crate is generic over: allocation-free callers pick a backend
//! (the reference backend is NIST P-256 in [`p256`]) and the protocol, codec
//! and relation machinery never look past these two traits.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use rand::{CryptoRng, RngCore};

use crate::errors::Error;

pub mod curve;
pub mod field;
pub mod p256;

/// An element of the scalar field of a prime-order group.
///
/// Scalars serialize to a fixed-width little-endian octet string of
/// `scalar_byte_length()` bytes. Decoding is canonical: values at or above
/// the field order are rejected.
pub trait ScalarField:
    Clone
    + PartialEq
    + Eq
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Sized
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Sample a uniform scalar from the injected randomness source.
    fn random(rng: &mut (impl RngCore + CryptoRng)) -> Self;

    /// Width of the fixed-length scalar encoding in bytes.
    fn scalar_byte_length() -> usize;

    /// Interpret `bytes` as a big-endian integer and reduce it modulo the
    /// field order. Used to map sponge output to challenges; `bytes` may be
    /// longer than the scalar encoding.
    fn from_uniform_bytes(bytes: &[u8]) -> Self;

    /// Fixed-width little-endian encoding.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode a fixed-width little-endian encoding.
    ///
    /// Returns [`Error::MalformedInput`] on a wrong length and
    /// [`Error::OutOfRange`] on a non-canonical value.
    fn from_bytes(data: &[u8]) -> Result<Self, Error>;
}

/// A prime-order group written additively.
///
/// Elements encode to a fixed-width compressed octet string of
/// `element_byte_length()` bytes, with the identity mapped to a `0x00` tag
/// byte followed by zero padding.
pub trait Group:
    Clone
    + PartialEq
    + Eq
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<<Self as Group>::Scalar, Output = Self>
    + Sized
{
    /// The scalar field acting on this group.
    type Scalar: ScalarField;

    /// The fixed generator.
    fn generator() -> Self;

    /// The identity element.
    fn identity() -> Self;

    /// Sample a random element as `r * generator()` for a uniform scalar `r`.
    fn random(rng: &mut (impl RngCore + CryptoRng)) -> Self {
        Self::generator() * Self::Scalar::random(rng)
    }

    /// Width of the fixed-length element encoding in bytes.
    fn element_byte_length() -> usize;

    /// Fixed-width compressed encoding.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode a fixed-width compressed encoding.
    fn from_bytes(data: &[u8]) -> Result<Self, Error>;

    /// Multi-scalar multiplication: `Σ scalars[i] * bases[i]`.
    fn msm(scalars: &[Self::Scalar], bases: &[Self]) -> Self {
        debug_assert_eq!(scalars.len(), bases.len());
        let mut acc = Self::identity();
        for (s, p) in scalars.iter().zip(bases.iter()) {
            acc = acc + p.clone() * s.clone();
        }
        acc
    }
}
