//! Error types for statement construction, proving and verification.

use crate::linear_relation::GroupVar;

/// The single error type surfaced by every fallible operation in this crate.
///
/// Verification reports a bare [`Error::VerificationFailure`] without
/// distinguishing which sub-check failed, so a verifier learns nothing about
/// a rejected proof beyond the statement shape it already knows.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reconstructed challenge differs, or a constraint equality does not hold.
    #[error("proof verification failed")]
    VerificationFailure,
    /// Witness, commitment or response length disagrees with the statement shape.
    #[error("invalid instance/witness pair")]
    InvalidInstanceWitnessPair,
    /// A group element variable was referenced before being assigned a value.
    #[error("unassigned group element variable {var:?}")]
    UnassignedGroupVar {
        /// The offending variable.
        var: GroupVar,
    },
    /// Input bytes rejected: bad length, point not on curve, or invalid encoding.
    #[error("malformed input at byte offset {position}")]
    MalformedInput {
        /// Byte offset of the rejected chunk within the input.
        position: usize,
    },
    /// An integer does not fit the target range (non-canonical scalar, oversized length prefix).
    #[error("value out of range: {0}")]
    OutOfRange(&'static str),
    /// The operation is not defined for these parameters.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
