//! The NIST P-256 (secp256r1) group backend.
//!
//! Curve parameters, generator and identity are memoized in statics. Group
//! elements use the 33-byte SEC1 compressed encoding with the identity mapped
//! to `0x00` followed by zero padding; scalars use 32-byte little-endian.

use std::sync::LazyLock;

use core::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use super::curve::{AffinePoint, EllipticCurve};
use super::field::PrimeField;
use super::{Group, ScalarField};
use crate::errors::Error;

const P_HEX: &[u8] = b"ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
const N_HEX: &[u8] = b"ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";
const B_HEX: &[u8] = b"5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b";
const GX_HEX: &[u8] = b"6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
const GY_HEX: &[u8] = b"4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";

const ELEMENT_BYTES: usize = 33;
const SCALAR_BYTES: usize = 32;

fn const_biguint(hex: &[u8]) -> BigUint {
    BigUint::parse_bytes(hex, 16).expect("valid hex constant")
}

static BASE_FIELD: LazyLock<PrimeField> =
    LazyLock::new(|| PrimeField::new(const_biguint(P_HEX)));

static SCALAR_FIELD: LazyLock<PrimeField> =
    LazyLock::new(|| PrimeField::new(const_biguint(N_HEX)));

static CURVE: LazyLock<EllipticCurve> = LazyLock::new(|| {
    // a = p - 3
    let a = BASE_FIELD.modulus() - 3u32;
    EllipticCurve::new(LazyLock::force(&BASE_FIELD), a, const_biguint(B_HEX))
        .expect("P-256 parameters are non-singular")
});

static GENERATOR: LazyLock<P256Point> = LazyLock::new(|| {
    P256Point(
        LazyLock::force(&CURVE)
            .point(const_biguint(GX_HEX), const_biguint(GY_HEX))
            .expect("P-256 generator lies on the curve"),
    )
});

static IDENTITY: LazyLock<P256Point> =
    LazyLock::new(|| P256Point(LazyLock::force(&CURVE).infinity()));

/// An element of the P-256 scalar field, the integers modulo the group order `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct P256Scalar(super::field::FieldElement);

impl P256Scalar {
    fn field() -> &'static PrimeField {
        LazyLock::force(&SCALAR_FIELD)
    }

    /// Build a scalar from an unsigned integer, reducing modulo `n`.
    pub fn from_biguint(value: BigUint) -> Self {
        Self(Self::field().elem(value))
    }

    /// The canonical representative in `[0, n)`.
    pub fn value(&self) -> &BigUint {
        self.0.value()
    }
}

impl ScalarField for P256Scalar {
    fn zero() -> Self {
        Self(Self::field().zero())
    }

    fn one() -> Self {
        Self(Self::field().one())
    }

    fn random(rng: &mut (impl RngCore + CryptoRng)) -> Self {
        Self(Self::field().random(rng))
    }

    fn scalar_byte_length() -> usize {
        SCALAR_BYTES
    }

    fn from_uniform_bytes(bytes: &[u8]) -> Self {
        Self::from_biguint(BigUint::from_bytes_be(bytes))
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.0.value().to_bytes_le();
        out.resize(SCALAR_BYTES, 0);
        out
    }

    fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() != SCALAR_BYTES {
            return Err(Error::MalformedInput { position: 0 });
        }
        let value = BigUint::from_bytes_le(data);
        if &value >= Self::field().modulus() {
            return Err(Error::OutOfRange("scalar exceeds the group order"));
        }
        Ok(Self::from_biguint(value))
    }
}

impl Add for P256Scalar {
    type Output = P256Scalar;

    fn add(self, rhs: P256Scalar) -> P256Scalar {
        P256Scalar(self.0 + rhs.0)
    }
}

impl Sub for P256Scalar {
    type Output = P256Scalar;

    fn sub(self, rhs: P256Scalar) -> P256Scalar {
        P256Scalar(self.0 - rhs.0)
    }
}

impl Mul for P256Scalar {
    type Output = P256Scalar;

    fn mul(self, rhs: P256Scalar) -> P256Scalar {
        P256Scalar(self.0 * rhs.0)
    }
}

impl Neg for P256Scalar {
    type Output = P256Scalar;

    fn neg(self) -> P256Scalar {
        P256Scalar(-self.0)
    }
}

/// A point on the P-256 curve, or the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct P256Point(AffinePoint);

impl Group for P256Point {
    type Scalar = P256Scalar;

    fn generator() -> Self {
        LazyLock::force(&GENERATOR).clone()
    }

    fn identity() -> Self {
        LazyLock::force(&IDENTITY).clone()
    }

    fn element_byte_length() -> usize {
        ELEMENT_BYTES
    }

    fn to_bytes(&self) -> Vec<u8> {
        if self.0.is_identity() {
            return vec![0u8; ELEMENT_BYTES];
        }
        self.0.to_compressed_bytes()
    }

    fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() != ELEMENT_BYTES {
            return Err(Error::MalformedInput { position: 0 });
        }
        if data[0] == 0x00 {
            if data[1..].iter().any(|&b| b != 0) {
                return Err(Error::MalformedInput { position: 1 });
            }
            return Ok(Self::identity());
        }
        AffinePoint::from_compressed_bytes(LazyLock::force(&CURVE), data).map(P256Point)
    }
}

impl Add for P256Point {
    type Output = P256Point;

    fn add(self, rhs: P256Point) -> P256Point {
        P256Point(&self.0 + &rhs.0)
    }
}

impl Sub for P256Point {
    type Output = P256Point;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: P256Point) -> P256Point {
        P256Point(&self.0 + &-&rhs.0)
    }
}

impl Neg for P256Point {
    type Output = P256Point;

    fn neg(self) -> P256Point {
        P256Point(-self.0)
    }
}

impl Mul<P256Scalar> for P256Point {
    type Output = P256Point;

    fn mul(self, rhs: P256Scalar) -> P256Point {
        P256Point(self.0.mul_scalar(rhs.value()))
    }
}
