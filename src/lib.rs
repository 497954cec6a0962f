#![allow(non_snake_case)]
//! Non-interactive zero-knowledge proofs for linear relations over
//! prime-order groups.
//!
//! A prover shows knowledge of a secret scalar vector `w` with `φ(w) = x`
//! for a public linear morphism `φ` and image `x`, without revealing `w`.
//! Statements are declared with the [`LinearRelation`] builder, finalized
//! into an [`Instance`], proven with the Schnorr Sigma protocol (possibly
//! AND/OR-composed) and made non-interactive through a duplex-sponge
//! Fiat-Shamir transform.
//!
//! ```
//! use rand::rngs::OsRng;
//! use sigma_proofs::ciphersuite::P256Shake128Nizk;
//! use sigma_proofs::group::p256::P256Point;
//! use sigma_proofs::group::{Group, ScalarField};
//! use sigma_proofs::{LinearRelation, SchnorrProof};
//!
//! // Statement: X = x * G, for a secret x.
//! let mut rng = OsRng;
//! let x = <P256Point as Group>::Scalar::random(&mut rng);
//!
//! let mut relation = LinearRelation::<P256Point>::new();
//! let var_x = relation.allocate_scalar();
//! let [var_G, var_X] = relation.allocate_elements();
//! relation.append_equation(var_X, var_x * var_G);
//! relation.set_element(var_G, P256Point::generator());
//! relation.compute_image(&[x.clone()]).unwrap();
//!
//! let nizk = P256Shake128Nizk::new(b"docs", SchnorrProof(relation.instance().unwrap())).unwrap();
//! let proof = nizk.prove_batchable(&vec![x], &mut rng).unwrap();
//! assert!(nizk.verify_batchable(&proof).is_ok());
//! ```

#![deny(unused_variables)]
#![deny(unused_mut)]

pub mod ciphersuite;
pub mod codec;
pub mod composition;
pub mod duplex_sponge;
pub mod errors;
pub mod fiat_shamir;
pub mod group;
pub mod linear_relation;
pub mod schnorr_protocol;
pub mod serialization;
pub mod traits;

pub use composition::{AndProof, OrProof};
pub use errors::Error;
pub use fiat_shamir::NISigmaProtocol;
pub use linear_relation::{Instance, LinearRelation};
pub use schnorr_protocol::SchnorrProof;
