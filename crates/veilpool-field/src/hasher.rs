//! sponge hash over the configured prime field
//!
//! rate-1 / capacity-1 sponge over a width-2 SPN permutation: add round
//! constant, cube, mix with the unimodular matrix [[1,1],[1,2]], for
//! [`FULL_ROUNDS`] full rounds. cubing is a bijection whenever
//! gcd(3, P-1) = 1, which [`FieldConfig`](crate::FieldConfig) enforces
//! (x^5, the other common choice, is not a bijection for the default
//! STARK prime since 5 divides P-1).
//!
//! round constants are nothing-up-my-sleeve: blake3 of a fixed domain tag
//! plus round and lane indices, reduced into the field. deriving them
//! from the configured modulus keeps a swapped field consistent end to
//! end instead of silently reusing constants that belong to another
//! prime.

use num_bigint::BigUint;

use crate::config::FieldConfig;
use crate::element::FieldElement;

/// full rounds of the permutation. the cube map's algebraic degree must
/// clear the field size: ceil(log3(2^251)) is 159, plus interpolation
/// margin in the MiMC style.
pub const FULL_ROUNDS: usize = 170;

const STATE_WIDTH: usize = 2;
const CONSTANTS_TAG: &[u8] = b"veilpool.sponge.round-constant.v1";

/// the field hash primitive. pure, `Send + Sync`; share via `Arc`.
#[derive(Clone, Debug)]
pub struct SpongeHasher {
    config: FieldConfig,
    round_constants: Vec<BigUint>,
    cube: BigUint,
}

impl SpongeHasher {
    pub fn new(config: FieldConfig) -> Self {
        let round_constants = derive_round_constants(&config);
        Self {
            config,
            round_constants,
            cube: BigUint::from(3u8),
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// hash an input sequence of any arity into one field element
    pub fn hash(&self, inputs: &[FieldElement]) -> FieldElement {
        let p = self.config.prime();

        // capacity lane starts at the input length, separating arities
        let mut state = [
            BigUint::from(0u8),
            BigUint::from(inputs.len() as u64) % p,
        ];

        for input in inputs {
            state[0] = (&state[0] + input.as_biguint()) % p;
            self.permute(&mut state);
        }
        if inputs.is_empty() {
            self.permute(&mut state);
        }

        self.config.element(state[0].clone())
    }

    /// two-to-one compression: sugar for `hash(&[a, b])`
    pub fn hash_two(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        self.hash(&[a.clone(), b.clone()])
    }

    fn permute(&self, state: &mut [BigUint; STATE_WIDTH]) {
        let p = self.config.prime();
        for round in 0..FULL_ROUNDS {
            for (lane, slot) in state.iter_mut().enumerate() {
                let constant = &self.round_constants[round * STATE_WIDTH + lane];
                let keyed = (&*slot + constant) % p;
                *slot = keyed.modpow(&self.cube, p);
            }
            let mixed0 = (&state[0] + &state[1]) % p;
            let mixed1 = (&state[0] + (&state[1] << 1u8)) % p;
            state[0] = mixed0;
            state[1] = mixed1;
        }
    }
}

fn derive_round_constants(config: &FieldConfig) -> Vec<BigUint> {
    let p = config.prime();
    let mut constants = Vec::with_capacity(FULL_ROUNDS * STATE_WIDTH);
    for round in 0..FULL_ROUNDS {
        for lane in 0..STATE_WIDTH {
            let mut hasher = blake3::Hasher::new();
            hasher.update(CONSTANTS_TAG);
            hasher.update(&(round as u32).to_le_bytes());
            hasher.update(&(lane as u32).to_le_bytes());
            // two blocks give >256 bits so the reduction bias is negligible
            let mut wide = [0u8; 64];
            hasher.finalize_xof().fill(&mut wide);
            constants.push(BigUint::from_bytes_be(&wide) % p);
        }
    }
    constants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> SpongeHasher {
        SpongeHasher::new(FieldConfig::stark())
    }

    #[test]
    fn test_deterministic() {
        let h = hasher();
        let cfg = h.config().clone();
        let a = cfg.element_from_u64(7);
        let b = cfg.element_from_u64(11);
        assert_eq!(h.hash_two(&a, &b), h.hash_two(&a, &b));
    }

    #[test]
    fn test_hash_two_is_arity_two_hash() {
        let h = hasher();
        let cfg = h.config().clone();
        let a = cfg.element_from_u64(1);
        let b = cfg.element_from_u64(2);
        assert_eq!(h.hash_two(&a, &b), h.hash(&[a.clone(), b.clone()]));
    }

    #[test]
    fn test_not_commutative() {
        let h = hasher();
        let cfg = h.config().clone();
        let a = cfg.element_from_u64(1);
        let b = cfg.element_from_u64(2);
        assert_ne!(h.hash_two(&a, &b), h.hash_two(&b, &a));
    }

    #[test]
    fn test_arity_separation() {
        let h = hasher();
        let cfg = h.config().clone();
        let a = cfg.element_from_u64(9);
        let zero = cfg.zero();
        assert_ne!(h.hash(&[a.clone()]), h.hash(&[a.clone(), zero.clone()]));
        assert_ne!(h.hash(&[]), h.hash(&[zero]));
    }

    #[test]
    fn test_input_sensitivity() {
        let h = hasher();
        let cfg = h.config().clone();
        let base = h.hash(&[cfg.element_from_u64(1), cfg.element_from_u64(2)]);
        let flipped = h.hash(&[cfg.element_from_u64(1), cfg.element_from_u64(3)]);
        assert_ne!(base, flipped);
    }

    #[test]
    fn test_outputs_are_reduced() {
        let h = hasher();
        let cfg = h.config().clone();
        for i in 0..16u64 {
            let out = h.hash(&[cfg.element_from_u64(i)]);
            assert!(out.as_biguint() < cfg.prime());
        }
    }

    #[test]
    fn test_reduced_inputs_hash_alike() {
        // ingestion reduces, so v and v + P are the same element
        let h = hasher();
        let cfg = h.config().clone();
        let small = cfg.element_from_u64(42);
        let wrapped = cfg.element(cfg.prime() + num_bigint::BigUint::from(42u8));
        assert_eq!(h.hash(&[small]), h.hash(&[wrapped]));
    }

    #[test]
    fn test_round_constants_distinct() {
        let h = hasher();
        let mut seen = std::collections::HashSet::new();
        for c in &h.round_constants {
            assert!(seen.insert(c.clone()), "duplicate round constant");
        }
    }

    #[test]
    fn test_different_primes_different_digests() {
        let stark = hasher();
        // the ed448 base field, 2^448 - 2^224 - 1 (also 2 mod 3)
        let ed448 = format!("0x{}e{}", "f".repeat(55), "f".repeat(56));
        let other = SpongeHasher::new(FieldConfig::parse(&ed448).unwrap());
        let a1 = stark.config().element_from_u64(5);
        let a2 = other.config().element_from_u64(5);
        assert_ne!(
            stark.hash(&[a1]).to_hex(),
            other.hash(&[a2]).to_hex()
        );
    }
}
