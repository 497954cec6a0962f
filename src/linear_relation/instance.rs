//! Finalized statements.

use sha2::{Digest, Sha256};

use super::{GroupVar, LinearMap};
use crate::errors::Error;
use crate::group::{Group, ScalarField};

/// An immutable `(linear_map, image)` pair: the public statement a proof is
/// made about.
///
/// Construction validates the statement shape once, so accessors and the
/// cached label are infallible afterwards.
#[derive(Clone, Debug)]
pub struct Instance<G: Group> {
    linear_map: LinearMap<G>,
    image: Vec<G>,
    label: [u8; 32],
}

impl<G: Group> Instance<G> {
    /// Validate a linear map and its claimed image into an instance.
    ///
    /// Requirements checked here:
    /// - the image holds one element per constraint;
    /// - every allocated group element variable is assigned;
    /// - scalar, element and constraint counts each fit in a `u32`.
    pub fn new(linear_map: LinearMap<G>, image: Vec<G>) -> Result<Self, Error> {
        if linear_map.num_constraints() != image.len() {
            return Err(Error::InvalidInstanceWitnessPair);
        }
        if linear_map.num_scalars > u32::MAX as usize
            || linear_map.num_elements > u32::MAX as usize
            || linear_map.num_constraints() > u32::MAX as usize
        {
            return Err(Error::OutOfRange("statement shape exceeds u32"));
        }
        for lc in &linear_map.constraints {
            for term in lc.terms() {
                if term.scalar().index() >= linear_map.num_scalars {
                    return Err(Error::InvalidInstanceWitnessPair);
                }
                linear_map.group_elements.get(term.elem())?;
            }
        }
        let elements = (0..linear_map.num_elements)
            .map(|i| linear_map.group_elements.get(GroupVar(i)))
            .collect::<Result<Vec<_>, Error>>()?;

        let label = compute_label::<G>(&linear_map, &elements, &image);
        Ok(Self {
            linear_map,
            image,
            label,
        })
    }

    /// The morphism underlying this statement.
    pub fn linear_map(&self) -> &LinearMap<G> {
        &self.linear_map
    }

    /// The claimed image, one element per constraint.
    pub fn image(&self) -> &[G] {
        &self.image
    }

    /// The domain-separated SHA-256 digest binding this statement.
    pub fn label(&self) -> [u8; 32] {
        self.label
    }

    /// Number of witness scalars the statement expects.
    pub fn num_scalars(&self) -> usize {
        self.linear_map.num_scalars
    }

    /// Number of constraints, i.e. commitment elements per proof.
    pub fn num_constraints(&self) -> usize {
        self.linear_map.num_constraints()
    }

    /// Total number of bytes of a serialized commitment for this statement.
    pub fn commit_bytes_len(&self) -> usize {
        self.num_constraints() * G::element_byte_length()
    }

    /// Total number of bytes of a serialized response for this statement.
    pub fn response_bytes_len(&self) -> usize {
        self.num_scalars() * G::Scalar::scalar_byte_length()
    }
}

/// SHA-256 over the statement shape, the element table and the image:
/// `num_scalars || num_elements || num_constraints` as 4-byte little-endian,
/// then the batch encodings of the elements and of the image.
fn compute_label<G: Group>(linear_map: &LinearMap<G>, elements: &[G], image: &[G]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update((linear_map.num_scalars as u32).to_le_bytes());
    hasher.update((linear_map.num_elements as u32).to_le_bytes());
    hasher.update((linear_map.num_constraints() as u32).to_le_bytes());
    for element in elements {
        hasher.update(element.to_bytes());
    }
    for element in image {
        hasher.update(element.to_bytes());
    }
    hasher.finalize().into()
}
