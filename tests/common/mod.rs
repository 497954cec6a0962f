//! Shared test fixtures: a deterministic RNG and a catalogue of statements.
#![allow(dead_code)]

use rand::{CryptoRng, RngCore};

use sigma_proofs::group::{Group, ScalarField};
use sigma_proofs::LinearRelation;

/// Deterministic linear-congruential RNG, so proofs are reproducible across
/// runs. Test-only: the constants come from Numerical Recipes.
pub struct TestDRNG {
    state: u32,
}

impl TestDRNG {
    pub fn new(seed: &[u8]) -> Self {
        let mut state = 0u32;
        for &byte in seed {
            state = state.wrapping_shl(8).wrapping_add(byte as u32);
        }
        Self { state }
    }

    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        self.state
    }
}

impl RngCore for TestDRNG {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = (self.step() & 0xff) as u8;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for TestDRNG {}

/// Statement: `X = x * G`.
#[allow(non_snake_case)]
pub fn discrete_logarithm<G: Group>(
    rng: &mut (impl RngCore + CryptoRng),
) -> (LinearRelation<G>, Vec<G::Scalar>) {
    let mut relation = LinearRelation::<G>::new();

    let var_x = relation.allocate_scalar();
    let [var_G, var_X] = relation.allocate_elements();
    relation.append_equation(var_X, var_x * var_G);
    relation.set_element(var_G, G::generator());

    let x = G::Scalar::random(rng);
    relation.compute_image(std::slice::from_ref(&x)).unwrap();
    (relation, vec![x])
}

/// Statement: `X = x * G  ∧  Y = x * H` for a random `H`.
#[allow(non_snake_case)]
pub fn dleq<G: Group>(
    rng: &mut (impl RngCore + CryptoRng),
) -> (LinearRelation<G>, Vec<G::Scalar>) {
    let mut relation = LinearRelation::<G>::new();

    let var_x = relation.allocate_scalar();
    let [var_G, var_X, var_H, var_Y] = relation.allocate_elements();
    relation.append_equation(var_X, var_x * var_G);
    relation.append_equation(var_Y, var_x * var_H);
    relation.set_elements([(var_G, G::generator()), (var_H, G::random(rng))]);

    let x = G::Scalar::random(rng);
    relation.compute_image(std::slice::from_ref(&x)).unwrap();
    (relation, vec![x])
}

/// Statement: `C = x * G + r * H`, a Pedersen commitment opening.
#[allow(non_snake_case)]
pub fn pedersen_commitment<G: Group>(
    rng: &mut (impl RngCore + CryptoRng),
) -> (LinearRelation<G>, Vec<G::Scalar>) {
    let mut relation = LinearRelation::<G>::new();

    let [var_x, var_r] = relation.allocate_scalars();
    let [var_G, var_H, var_C] = relation.allocate_elements();
    relation.append_equation(var_C, var_x * var_G + var_r * var_H);
    relation.set_elements([(var_G, G::generator()), (var_H, G::random(rng))]);

    let witness = vec![G::Scalar::random(rng), G::Scalar::random(rng)];
    relation.compute_image(&witness).unwrap();
    (relation, witness)
}

/// Statement: `X = x * G0 + r * G1  ∧  Y = x * G2 + r * G3` over four random
/// generators, a Pedersen-commitment DLEQ.
#[allow(non_snake_case)]
pub fn pedersen_commitment_dleq<G: Group>(
    rng: &mut (impl RngCore + CryptoRng),
) -> (LinearRelation<G>, Vec<G::Scalar>) {
    let mut relation = LinearRelation::<G>::new();

    let [var_x, var_r] = relation.allocate_scalars();
    let gens = relation.allocate_elements::<4>();
    let [var_X, var_Y] = relation.allocate_elements();
    relation.append_equation(var_X, [(var_x, gens[0]), (var_r, gens[1])]);
    relation.append_equation(var_Y, [(var_x, gens[2]), (var_r, gens[3])]);
    for var in gens {
        relation.set_element(var, G::random(rng));
    }

    let witness = vec![G::Scalar::random(rng), G::Scalar::random(rng)];
    relation.compute_image(&witness).unwrap();
    (relation, witness)
}
