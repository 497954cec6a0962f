//! Arithmetic in prime fields GF(p).
//!
//! Elements carry a reference to their [`PrimeField`], which is expected to
//! live in a `static` (the P-256 backend memoizes its fields with
//! [`std::sync::LazyLock`]). Inversion is the Fermat inverse `a^(p-2)`;
//! square roots use the `p ≡ 3 (mod 4)` shortcut. None of these routines is
//! constant-time.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::errors::Error;

/// A prime field GF(p), p an odd prime.
#[derive(Debug)]
pub struct PrimeField {
    p: BigUint,
}

impl PrimeField {
    /// Create the field of integers modulo `p`.
    pub fn new(p: BigUint) -> Self {
        Self { p }
    }

    /// The field modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Number of bytes needed to hold a canonical element.
    pub fn byte_length(&self) -> usize {
        ((self.p.bits() + 7) / 8) as usize
    }

    /// Build an element, reducing `value` modulo `p`.
    pub fn elem(&'static self, value: BigUint) -> FieldElement {
        FieldElement {
            value: value % &self.p,
            field: self,
        }
    }

    pub fn zero(&'static self) -> FieldElement {
        self.elem(BigUint::zero())
    }

    pub fn one(&'static self) -> FieldElement {
        self.elem(BigUint::one())
    }

    /// Sample a uniform element from the injected randomness source.
    pub fn random(&'static self, rng: &mut (impl RngCore + CryptoRng)) -> FieldElement {
        FieldElement {
            value: rng.gen_biguint_below(&self.p),
            field: self,
        }
    }
}

/// An element of a [`PrimeField`].
#[derive(Clone)]
pub struct FieldElement {
    value: BigUint,
    field: &'static PrimeField,
}

impl FieldElement {
    /// The canonical representative in `[0, p)`.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The field this element belongs to.
    pub fn field(&self) -> &'static PrimeField {
        self.field
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Parity of the canonical representative.
    pub fn is_odd(&self) -> bool {
        self.value.bit(0)
    }

    /// Modular exponentiation.
    pub fn pow(&self, exp: &BigUint) -> FieldElement {
        FieldElement {
            value: self.value.modpow(exp, &self.field.p),
            field: self.field,
        }
    }

    /// Fermat inverse `a^(p-2)`. Maps zero to zero.
    pub fn invert(&self) -> FieldElement {
        let exp = &self.field.p - 2u32;
        self.pow(&exp)
    }

    /// Euler criterion. Zero counts as a square.
    pub fn is_square(&self) -> bool {
        if self.value.is_zero() {
            return true;
        }
        let exp = (&self.field.p - 1u32) >> 1;
        self.value.modpow(&exp, &self.field.p).is_one()
    }

    /// Square root via `a^((p+1)/4)`, defined when `p ≡ 3 (mod 4)`.
    ///
    /// Returns `Ok(None)` when the element is not a quadratic residue, and
    /// [`Error::Unsupported`] for moduli outside the shortcut.
    pub fn sqrt(&self) -> Result<Option<FieldElement>, Error> {
        if (&self.field.p % 4u32) != BigUint::from(3u32) {
            return Err(Error::Unsupported("square root requires p = 3 mod 4"));
        }
        if !self.is_square() {
            return Ok(None);
        }
        let exp = (&self.field.p + 1u32) >> 2;
        Ok(Some(self.pow(&exp)))
    }

    /// Fixed-width big-endian encoding, left-padded with zeros to `len` bytes.
    pub fn to_bytes_be(&self, len: usize) -> Vec<u8> {
        let raw = self.value.to_bytes_be();
        let mut out = vec![0u8; len - raw.len()];
        out.extend_from_slice(&raw);
        out
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.value)
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.field, other.field) && self.value == other.value
    }
}

impl Eq for FieldElement {}

impl Add for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        FieldElement {
            value: (&self.value + &rhs.value) % &self.field.p,
            field: self.field,
        }
    }
}

impl Sub for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        FieldElement {
            value: (&self.value + &self.field.p - &rhs.value) % &self.field.p,
            field: self.field,
        }
    }
}

impl Mul for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement {
            value: (&self.value * &rhs.value) % &self.field.p,
            field: self.field,
        }
    }
}

/// Division by the Fermat inverse of the divisor.
impl Div for &FieldElement {
    type Output = FieldElement;

    fn div(self, rhs: &FieldElement) -> FieldElement {
        self * &rhs.invert()
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        FieldElement {
            value: (&self.field.p - &self.value) % &self.field.p,
            field: self.field,
        }
    }
}

macro_rules! forward_owned_binop {
    ($($trait:ident::$method:ident),+) => {
        $(
        impl $trait for FieldElement {
            type Output = FieldElement;

            fn $method(self, rhs: FieldElement) -> FieldElement {
                $trait::$method(&self, &rhs)
            }
        }
        )+
    };
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul, Div::div);

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}
