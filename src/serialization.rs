//! Batch (de)serialization of group elements and scalars.
//!
//! Batch encodings are plain concatenations of the fixed-width per-value
//! encodings, so the same bytes serve as wire format and as sponge input.

use crate::errors::Error;
use crate::group::{Group, ScalarField};

/// Concatenate the fixed-width encodings of `elements`.
pub fn serialize_elements<G: Group>(elements: &[G]) -> Vec<u8> {
    let mut out = Vec::with_capacity(elements.len() * G::element_byte_length());
    for element in elements {
        out.extend_from_slice(&element.to_bytes());
    }
    out
}

/// Decode exactly `count` group elements from `data`.
///
/// Rejects the input when its length is not `count` elements; element-level
/// errors are reported at their absolute byte offset.
pub fn deserialize_elements<G: Group>(data: &[u8], count: usize) -> Result<Vec<G>, Error> {
    let width = G::element_byte_length();
    if data.len() != count * width {
        return Err(Error::MalformedInput {
            position: data.len(),
        });
    }
    data.chunks(width)
        .enumerate()
        .map(|(i, chunk)| G::from_bytes(chunk).map_err(|err| at_offset(err, i * width)))
        .collect()
}

/// Concatenate the fixed-width little-endian encodings of `scalars`.
pub fn serialize_scalars<G: Group>(scalars: &[G::Scalar]) -> Vec<u8> {
    let mut out = Vec::with_capacity(scalars.len() * G::Scalar::scalar_byte_length());
    for scalar in scalars {
        out.extend_from_slice(&scalar.to_bytes());
    }
    out
}

/// Decode exactly `count` scalars from `data`.
pub fn deserialize_scalars<G: Group>(data: &[u8], count: usize) -> Result<Vec<G::Scalar>, Error> {
    let width = G::Scalar::scalar_byte_length();
    if data.len() != count * width {
        return Err(Error::MalformedInput {
            position: data.len(),
        });
    }
    data.chunks(width)
        .enumerate()
        .map(|(i, chunk)| G::Scalar::from_bytes(chunk).map_err(|err| at_offset(err, i * width)))
        .collect()
}

fn at_offset(err: Error, offset: usize) -> Error {
    match err {
        Error::MalformedInput { position } => Error::MalformedInput {
            position: position + offset,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::p256::P256Point;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn batch_round_trips() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let elements = vec![
            P256Point::generator(),
            P256Point::identity(),
            P256Point::random(&mut rng),
        ];
        let bytes = serialize_elements(&elements);
        assert_eq!(bytes.len(), 3 * 33);
        assert_eq!(
            deserialize_elements::<P256Point>(&bytes, 3).unwrap(),
            elements
        );

        let scalars: Vec<_> = (0..3)
            .map(|_| <P256Point as Group>::Scalar::random(&mut rng))
            .collect();
        let bytes = serialize_scalars::<P256Point>(&scalars);
        assert_eq!(bytes.len(), 3 * 32);
        assert_eq!(
            deserialize_scalars::<P256Point>(&bytes, 3).unwrap(),
            scalars
        );
    }

    #[test]
    fn wrong_count_is_rejected() {
        let bytes = serialize_elements(&[P256Point::generator()]);
        assert!(deserialize_elements::<P256Point>(&bytes, 2).is_err());
        assert!(deserialize_elements::<P256Point>(&bytes[1..], 1).is_err());
    }

    #[test]
    fn errors_carry_absolute_offsets() {
        let mut bytes = serialize_elements(&[P256Point::generator(), P256Point::identity()]);
        // corrupt the second element's padding
        bytes[34] = 0xff;
        match deserialize_elements::<P256Point>(&bytes, 2) {
            Err(Error::MalformedInput { position }) => assert_eq!(position, 34),
            other => panic!("expected malformed input, got {other:?}"),
        }
    }
}
