//! Short-Weierstrass curves `y² = x³ + ax + b` in affine coordinates.
//!
//! Point arithmetic follows the textbook affine formulas; scalar
//! multiplication is plain double-and-add over the scalar's bits. This is
//! variable-time arithmetic, matching the rest of the [`field`](super::field)
//! layer.

use core::fmt;
use core::ops::{Add, Neg};

use num_bigint::BigUint;
use num_traits::Zero;

use super::field::{FieldElement, PrimeField};
use crate::errors::Error;

/// A short-Weierstrass curve over a prime field.
#[derive(Debug)]
pub struct EllipticCurve {
    field: &'static PrimeField,
    a: FieldElement,
    b: FieldElement,
}

impl EllipticCurve {
    /// Build the curve `y² = x³ + ax + b`, rejecting singular parameter sets.
    pub fn new(field: &'static PrimeField, a: BigUint, b: BigUint) -> Result<Self, Error> {
        let a = field.elem(a);
        let b = field.elem(b);
        // discriminant -16(4a³ + 27b²)
        let four_a3 = &(&(&a * &a) * &a) * &field.elem(BigUint::from(4u32));
        let twenty_seven_b2 = &(&b * &b) * &field.elem(BigUint::from(27u32));
        if (four_a3 + twenty_seven_b2).is_zero() {
            return Err(Error::Unsupported("singular curve"));
        }
        Ok(Self { field, a, b })
    }

    pub fn field(&self) -> &'static PrimeField {
        self.field
    }

    /// The point at infinity.
    pub fn infinity(&'static self) -> AffinePoint {
        AffinePoint {
            curve: self,
            coords: None,
        }
    }

    /// Build an affine point, checking the curve equation.
    pub fn point(&'static self, x: BigUint, y: BigUint) -> Result<AffinePoint, Error> {
        let x = self.field.elem(x);
        let y = self.field.elem(y);
        if &y * &y != self.equation_rhs(&x) {
            return Err(Error::MalformedInput { position: 0 });
        }
        Ok(AffinePoint {
            curve: self,
            coords: Some((x, y)),
        })
    }

    /// Recover the point with the given x-coordinate and y-parity, as used by
    /// compressed decoding. Fails when `x³ + ax + b` has no square root.
    pub fn lift_x(&'static self, x: FieldElement, y_is_odd: bool) -> Result<AffinePoint, Error> {
        let y = self
            .equation_rhs(&x)
            .sqrt()?
            .ok_or(Error::MalformedInput { position: 0 })?;
        let y = if y.is_odd() == y_is_odd { y } else { -y };
        Ok(AffinePoint {
            curve: self,
            coords: Some((x, y)),
        })
    }

    /// `x³ + ax + b`.
    fn equation_rhs(&self, x: &FieldElement) -> FieldElement {
        &(&(&(x * x) * x) + &(&self.a * x)) + &self.b
    }
}

/// A point on an [`EllipticCurve`], or the point at infinity.
#[derive(Clone)]
pub struct AffinePoint {
    curve: &'static EllipticCurve,
    coords: Option<(FieldElement, FieldElement)>,
}

impl AffinePoint {
    pub fn is_identity(&self) -> bool {
        self.coords.is_none()
    }

    /// Affine coordinates; `None` for the point at infinity.
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        self.coords.as_ref().map(|(x, y)| (x, y))
    }

    /// Double-and-add scalar multiplication over the scalar's magnitude.
    pub fn mul_scalar(&self, k: &BigUint) -> AffinePoint {
        let mut result = self.curve.infinity();
        if k.is_zero() {
            return result;
        }
        let mut addend = self.clone();
        for i in 0..k.bits() {
            if k.bit(i) {
                result = &result + &addend;
            }
            addend = &addend + &addend;
        }
        result
    }

    /// Variable-width compressed encoding: a lone `0x00` for the identity,
    /// otherwise a `0x02`/`0x03` parity tag followed by big-endian x.
    pub fn to_compressed_bytes(&self) -> Vec<u8> {
        match &self.coords {
            None => vec![0x00],
            Some((x, y)) => {
                let tag = if y.is_odd() { 0x03 } else { 0x02 };
                let mut out = vec![tag];
                out.extend_from_slice(&x.to_bytes_be(self.curve.field.byte_length()));
                out
            }
        }
    }

    /// Decode the compressed encoding produced by [`Self::to_compressed_bytes`].
    pub fn from_compressed_bytes(
        curve: &'static EllipticCurve,
        data: &[u8],
    ) -> Result<AffinePoint, Error> {
        match data {
            [0x00] => Ok(curve.infinity()),
            [tag @ (0x02 | 0x03), x_bytes @ ..] if x_bytes.len() == curve.field.byte_length() => {
                let x = curve.field.elem(BigUint::from_bytes_be(x_bytes));
                curve.lift_x(x, *tag == 0x03)
            }
            _ => Err(Error::MalformedInput { position: 0 }),
        }
    }
}

impl Add for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: &AffinePoint) -> AffinePoint {
        let (x1, y1) = match &self.coords {
            None => return rhs.clone(),
            Some(c) => c,
        };
        let (x2, y2) = match &rhs.coords {
            None => return self.clone(),
            Some(c) => c,
        };

        let s = if x1 == x2 {
            if y1 != y2 || y1.is_zero() {
                // Inverse points, or doubling a two-torsion point.
                return self.curve.infinity();
            }
            let three = self.curve.field.elem(BigUint::from(3u32));
            let two = self.curve.field.elem(BigUint::from(2u32));
            &(&(&three * &(x1 * x1)) + &self.curve.a) / &(&two * y1)
        } else {
            &(y2 - y1) / &(x2 - x1)
        };

        let x3 = &(&(&s * &s) - x1) - x2;
        let y3 = &(&s * &(x1 - &x3)) - y1;
        AffinePoint {
            curve: self.curve,
            coords: Some((x3, y3)),
        }
    }
}

impl Add for AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: AffinePoint) -> AffinePoint {
        &self + &rhs
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        AffinePoint {
            curve: self.curve,
            coords: self.coords.as_ref().map(|(x, y)| (x.clone(), -y)),
        }
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl Eq for AffinePoint {}

impl fmt::Debug for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coords {
            None => write!(f, "AffinePoint(infinity)"),
            Some((x, y)) => write!(f, "AffinePoint({:?}, {:?})", x.value(), y.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    // y² = x³ + x + 1 over GF(23): a group of order 28 with (0, 1) on it.
    static F23: LazyLock<PrimeField> = LazyLock::new(|| PrimeField::new(BigUint::from(23u32)));
    static CURVE: LazyLock<EllipticCurve> = LazyLock::new(|| {
        EllipticCurve::new(
            LazyLock::force(&F23),
            BigUint::from(1u32),
            BigUint::from(1u32),
        )
        .unwrap()
    });

    fn curve() -> &'static EllipticCurve {
        LazyLock::force(&CURVE)
    }

    fn base() -> AffinePoint {
        curve().point(BigUint::from(0u32), BigUint::from(1u32)).unwrap()
    }

    #[test]
    fn identity_is_absorbing() {
        let p = base();
        let inf = curve().infinity();
        assert!(inf.coordinates().is_none());
        assert_eq!(&p + &inf, p);
        assert_eq!(&inf + &p, p);
        assert_eq!(&inf + &inf, inf);
    }

    #[test]
    fn inverse_points_sum_to_identity() {
        let p = base();
        assert_eq!(&p + &-&p, curve().infinity());
    }

    #[test]
    fn doubling_matches_known_value() {
        let p = base();
        let doubled = curve()
            .point(BigUint::from(6u32), BigUint::from(19u32))
            .unwrap();
        assert_eq!(&p + &p, doubled);
        assert_eq!(p.mul_scalar(&BigUint::from(2u32)), doubled);
    }

    #[test]
    fn scalar_multiplication_is_additive() {
        let p = base();
        let lhs = p.mul_scalar(&BigUint::from(11u32));
        let rhs = &p.mul_scalar(&BigUint::from(5u32)) + &p.mul_scalar(&BigUint::from(6u32));
        assert_eq!(lhs, rhs);
        assert!(p.mul_scalar(&BigUint::from(0u32)).is_identity());
        // the subgroup generated by (0, 1) has order 28
        assert!(p.mul_scalar(&BigUint::from(28u32)).is_identity());
    }

    #[test]
    fn rejects_points_off_the_curve() {
        assert!(matches!(
            curve().point(BigUint::from(1u32), BigUint::from(5u32)),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn compressed_round_trip() {
        let mut p = base();
        for _ in 0..5 {
            let bytes = p.to_compressed_bytes();
            let back = AffinePoint::from_compressed_bytes(curve(), &bytes).unwrap();
            assert_eq!(back, p);
            p = &p + &base();
        }
        let inf_bytes = curve().infinity().to_compressed_bytes();
        assert_eq!(inf_bytes, vec![0x00]);
        assert!(
            AffinePoint::from_compressed_bytes(curve(), &inf_bytes)
                .unwrap()
                .is_identity()
        );
    }

    #[test]
    fn rejects_singular_parameters() {
        // a = 0, b = 0 has zero discriminant.
        assert!(matches!(
            EllipticCurve::new(LazyLock::force(&F23), BigUint::from(0u32), BigUint::from(0u32)),
            Err(Error::Unsupported(_))
        ));
    }
}
