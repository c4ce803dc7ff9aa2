//! the derivation functions
//!
//! each is a fixed composition of pair-hashes. the nesting below is the
//! same shape the on-chain verifier recomputes, spelled out once per
//! function:
//!
//! ```text
//! commitment  C = H(H(H(H(H(secret, seed), amount_low), amount_high), randomness), DOM_C)
//! nullifier   N = H(H(secret, DOM_N), leaf_index)
//! ```

use veilpool_field::{FieldElement, SpongeHasher};

use crate::amount::Amount;
use crate::{COMMITMENT_DOMAIN, NULLIFIER_DOMAIN};

/// single two-to-one hash
pub fn hash_pair(h: &SpongeHasher, a: &FieldElement, b: &FieldElement) -> FieldElement {
    h.hash_two(a, b)
}

/// chain an arbitrary-length list through pair-hashes, starting from zero
///
/// distinct from the merkle accumulator: this is the flat "hash many
/// values" utility used for calldata digests and the like.
pub fn hash_array(h: &SpongeHasher, values: &[FieldElement]) -> FieldElement {
    let mut state = h.config().zero();
    for v in values {
        state = h.hash_two(&state, v);
    }
    state
}

/// derive the deposit commitment
pub fn commitment(
    h: &SpongeHasher,
    secret: &FieldElement,
    nullifier_seed: &FieldElement,
    amount: Amount,
    randomness: &FieldElement,
) -> FieldElement {
    let cfg = h.config();
    let low = cfg.element_from_u128(amount.low);
    let high = cfg.element_from_u128(amount.high);
    let domain = cfg.element_from_u128(COMMITMENT_DOMAIN);

    let acc = h.hash_two(secret, nullifier_seed);
    let acc = h.hash_two(&acc, &low);
    let acc = h.hash_two(&acc, &high);
    let acc = h.hash_two(&acc, randomness);
    h.hash_two(&acc, &domain)
}

/// derive the nullifier for the note sitting at `leaf_index`
///
/// binding the accumulator position is what makes one nullifier exist
/// per spendable note even when secrets are reused across deposits.
pub fn nullifier(h: &SpongeHasher, secret: &FieldElement, leaf_index: u64) -> FieldElement {
    let cfg = h.config();
    let domain = cfg.element_from_u128(NULLIFIER_DOMAIN);
    let index = cfg.element_from_u64(leaf_index);

    let acc = h.hash_two(secret, &domain);
    h.hash_two(&acc, &index)
}

/// deterministic blinding factor from a secret and nonce
pub fn blinding_factor(h: &SpongeHasher, secret: &FieldElement, nonce: u64) -> FieldElement {
    h.hash_two(secret, &h.config().element_from_u64(nonce))
}

/// repeated pair-hashing with an incrementing counter, for deriving
/// additional pseudorandom material from one secret. zero rounds is the
/// identity.
pub fn stretch(h: &SpongeHasher, input: &FieldElement, rounds: u32) -> FieldElement {
    let cfg = h.config();
    let mut current = input.clone();
    for i in 0..rounds {
        current = h.hash_two(&current, &cfg.element_from_u64(u64::from(i)));
    }
    current
}

/// commit to a value and its bit-width without revealing it
pub fn range_commitment(
    h: &SpongeHasher,
    value: Amount,
    blinding: &FieldElement,
    bits: u32,
) -> FieldElement {
    let cfg = h.config();
    let low = cfg.element_from_u128(value.low);
    let high = cfg.element_from_u128(value.high);

    let acc = h.hash_two(&low, &high);
    let acc = h.hash_two(&acc, blinding);
    h.hash_two(&acc, &cfg.element_from_u64(u64::from(bits)))
}
