//! Named ciphersuites: a group, a codec and a sponge variant fixed together.
//!
//! A ciphersuite pins down the full transcript and wire format of a proof, so
//! two parties naming the same suite interoperate at the byte level.

use crate::codec::ByteSchnorrCodec;
use crate::composition::{AndProof, OrProof};
use crate::duplex_sponge::{Keccak256DuplexSponge, Shake128DuplexSponge};
use crate::fiat_shamir::NISigmaProtocol;
use crate::group::p256::P256Point;
use crate::schnorr_protocol::SchnorrProof;

/// Registry name of the P-256 + SHAKE128 suite.
pub const P256_SHAKE128: &str = "P256_SHAKE128";
/// Registry name of the P-256 + Keccak256 suite.
pub const P256_KECCAK256: &str = "P256_KECCAK256";

/// The codec of the `P256_SHAKE128` suite.
pub type P256Shake128Codec = ByteSchnorrCodec<P256Point, Shake128DuplexSponge>;
/// The codec of the `P256_KECCAK256` suite.
pub type P256Keccak256Codec = ByteSchnorrCodec<P256Point, Keccak256DuplexSponge>;

/// Schnorr proofs over P-256 with the SHAKE128 sponge.
pub type P256Shake128Nizk = NISigmaProtocol<SchnorrProof<P256Point>, P256Shake128Codec>;
/// Schnorr proofs over P-256 with the Keccak256 sponge.
pub type P256Keccak256Nizk = NISigmaProtocol<SchnorrProof<P256Point>, P256Keccak256Codec>;

/// AND-composed proofs over P-256 with the SHAKE128 sponge.
pub type P256Shake128AndNizk = NISigmaProtocol<AndProof<P256Point>, P256Shake128Codec>;
/// AND-composed proofs over P-256 with the Keccak256 sponge.
pub type P256Keccak256AndNizk = NISigmaProtocol<AndProof<P256Point>, P256Keccak256Codec>;

/// OR-composed proofs over P-256 with the SHAKE128 sponge.
pub type P256Shake128OrNizk = NISigmaProtocol<OrProof<P256Point>, P256Shake128Codec>;
/// OR-composed proofs over P-256 with the Keccak256 sponge.
pub type P256Keccak256OrNizk = NISigmaProtocol<OrProof<P256Point>, P256Keccak256Codec>;
