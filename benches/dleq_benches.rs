use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use sigma_proofs::ciphersuite::P256Shake128Nizk;
use sigma_proofs::group::p256::P256Point;
use sigma_proofs::group::{Group, ScalarField};
use sigma_proofs::{LinearRelation, SchnorrProof};

type G = P256Point;
type Scalar = <P256Point as Group>::Scalar;

#[allow(non_snake_case)]
fn dleq_nizk(rng: &mut ChaCha20Rng) -> (P256Shake128Nizk, Vec<Scalar>) {
    let mut relation = LinearRelation::<G>::new();
    let var_x = relation.allocate_scalar();
    let [var_G, var_X, var_H, var_Y] = relation.allocate_elements();
    relation.append_equation(var_X, var_x * var_G);
    relation.append_equation(var_Y, var_x * var_H);
    relation.set_elements([(var_G, G::generator()), (var_H, G::random(rng))]);

    let x = Scalar::random(rng);
    relation.compute_image(std::slice::from_ref(&x)).unwrap();

    let nizk = P256Shake128Nizk::new(
        b"bench-dleq",
        SchnorrProof(relation.instance().unwrap()),
    )
    .unwrap();
    (nizk, vec![x])
}

fn bench_dleq(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0xd1e9);
    let (nizk, witness) = dleq_nizk(&mut rng);
    let proof = nizk.prove_batchable(&witness, &mut rng).unwrap();

    c.bench_function("dleq_prove_batchable", |b| {
        b.iter(|| nizk.prove_batchable(&witness, &mut rng).unwrap())
    });
    c.bench_function("dleq_verify_batchable", |b| {
        b.iter(|| nizk.verify_batchable(&proof).unwrap())
    });
}

criterion_group!(benches, bench_dleq);
criterion_main!(benches);
