//! inclusion proofs
//!
//! a proof is the ordered sibling sequence for one leaf, leaf level
//! first - the layout the external verifier expects. a proof is only
//! meaningful against the root it was generated under; re-request after
//! the tree grows.

use veilpool_field::{FieldElement, SpongeHasher};

/// sibling path witnessing one leaf's position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionProof {
    /// index the leaf was inserted at
    pub index: u64,
    /// one sibling per level, leaf level first
    pub siblings: Vec<FieldElement>,
}

impl InclusionProof {
    /// recompute the root from `leaf` and compare it to `expected_root`
    ///
    /// pure and total: a well-formed but wrong proof is `false`, never an
    /// error. left/right order at each level follows the parity of the
    /// index as it halves toward the root. roots compare as canonical
    /// field elements, so hex case on the wire cannot matter.
    pub fn verify(
        &self,
        hasher: &SpongeHasher,
        leaf: &FieldElement,
        expected_root: &FieldElement,
    ) -> bool {
        let mut computed = leaf.clone();
        let mut idx = self.index;

        for sibling in &self.siblings {
            computed = if idx % 2 == 0 {
                hasher.hash_two(&computed, sibling)
            } else {
                hasher.hash_two(sibling, &computed)
            };
            idx /= 2;
        }

        computed == *expected_root
    }
}
