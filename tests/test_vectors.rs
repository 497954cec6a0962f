//! Test-vector generation and byte-level re-verification.
//!
//! Vectors follow the interop JSON schema: objects keyed by
//! `<case>_<suite>` with `Ciphersuite`, `SessionId`, `Statement` (hex of the
//! instance label), `Witness` (hex of the concatenated little-endian
//! scalars) and `Proof` (hex bytes).

mod common;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sigma_proofs::ciphersuite::{
    P256Keccak256Codec, P256Shake128Codec, P256_KECCAK256, P256_SHAKE128,
};
use sigma_proofs::codec::Codec;
use sigma_proofs::fiat_shamir::NISigmaProtocol;
use sigma_proofs::group::p256::{P256Point, P256Scalar};
use sigma_proofs::serialization::serialize_scalars;
use sigma_proofs::{LinearRelation, SchnorrProof};

use common::{discrete_logarithm, dleq, pedersen_commitment, TestDRNG};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
struct TestVector {
    #[serde(rename = "Ciphersuite")]
    ciphersuite: String,
    #[serde(rename = "SessionId")]
    session_id: String,
    #[serde(rename = "Statement")]
    statement: String,
    #[serde(rename = "Witness")]
    witness: String,
    #[serde(rename = "Proof")]
    proof: String,
}

type Builder = fn(&mut TestDRNG) -> (LinearRelation<P256Point>, Vec<P256Scalar>);

const CASES: [(&str, Builder); 3] = [
    ("discrete_logarithm", discrete_logarithm::<P256Point>),
    ("dleq", dleq::<P256Point>),
    ("pedersen_commitment", pedersen_commitment::<P256Point>),
];

fn generate_vector<C>(case: &str, suite: &str, build: Builder) -> (String, TestVector)
where
    C: Codec<Challenge = P256Scalar> + Clone,
{
    let mut instance_rng = TestDRNG::new(b"instance_witness_generation_seed");
    let (relation, witness) = build(&mut instance_rng);
    let instance = relation.instance().unwrap();

    let session_id = case.as_bytes();
    let nizk = NISigmaProtocol::<SchnorrProof<P256Point>, C>::new(
        session_id,
        SchnorrProof(instance.clone()),
    )
    .unwrap();
    let mut proof_rng = TestDRNG::new(b"proof_generation_seed");
    let proof = nizk.prove_batchable(&witness, &mut proof_rng).unwrap();
    assert!(nizk.verify_batchable(&proof).is_ok());

    (
        format!("{case}_{suite}"),
        TestVector {
            ciphersuite: suite.to_string(),
            session_id: hex::encode(session_id),
            statement: hex::encode(instance.label()),
            witness: hex::encode(serialize_scalars::<P256Point>(&witness)),
            proof: hex::encode(&proof),
        },
    )
}

/// Rebuild the statement from the recorded seed and check the stored proof
/// bytes against the stored session and statement.
fn reverify_vector<C>(vector: &TestVector, build: Builder)
where
    C: Codec<Challenge = P256Scalar> + Clone,
{
    let mut instance_rng = TestDRNG::new(b"instance_witness_generation_seed");
    let (relation, witness) = build(&mut instance_rng);
    let instance = relation.instance().unwrap();
    assert_eq!(hex::encode(instance.label()), vector.statement);
    assert_eq!(
        hex::encode(serialize_scalars::<P256Point>(&witness)),
        vector.witness
    );

    let session_id = hex::decode(&vector.session_id).unwrap();
    let nizk =
        NISigmaProtocol::<SchnorrProof<P256Point>, C>::new(&session_id, SchnorrProof(instance))
            .unwrap();
    let proof = hex::decode(&vector.proof).unwrap();
    assert!(nizk.verify_batchable(&proof).is_ok());
}

fn generate_all() -> BTreeMap<String, TestVector> {
    let mut vectors = BTreeMap::new();
    for (case, build) in CASES {
        let (key, vector) = generate_vector::<P256Shake128Codec>(case, P256_SHAKE128, build);
        vectors.insert(key, vector);
        let (key, vector) = generate_vector::<P256Keccak256Codec>(case, P256_KECCAK256, build);
        vectors.insert(key, vector);
    }
    vectors
}

/// Stored vectors round-trip through JSON and re-verify at the byte level.
#[test]
fn vectors_survive_json_round_trip() {
    let vectors = generate_all();
    let json = serde_json::to_string_pretty(&vectors).unwrap();
    let parsed: BTreeMap<String, TestVector> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, vectors);

    for (case, build) in CASES {
        for suite in [P256_SHAKE128, P256_KECCAK256] {
            let vector = &parsed[&format!("{case}_{suite}")];
            assert_eq!(vector.ciphersuite, suite);
            match vector.ciphersuite.as_str() {
                P256_SHAKE128 => reverify_vector::<P256Shake128Codec>(vector, build),
                P256_KECCAK256 => reverify_vector::<P256Keccak256Codec>(vector, build),
                other => panic!("unknown ciphersuite {other}"),
            }
        }
    }
}

/// Vector generation is fully deterministic.
#[test]
fn vector_generation_is_reproducible() {
    let first = serde_json::to_string(&generate_all()).unwrap();
    let second = serde_json::to_string(&generate_all()).unwrap();
    assert_eq!(first, second);
}

/// The two suites disagree on proof bytes for the same statement.
#[test]
fn suites_produce_distinct_proofs() {
    let vectors = generate_all();
    for (case, _) in CASES {
        let shake = &vectors[&format!("{case}_{P256_SHAKE128}")];
        let keccak = &vectors[&format!("{case}_{P256_KECCAK256}")];
        assert_eq!(shake.statement, keccak.statement);
        assert_ne!(shake.proof, keccak.proof);
    }
}
