//! append-only merkle accumulator over deposit commitments
//!
//! position matters: a leaf's index is part of what a withdrawal proves
//! (nullifiers are derived from it), so leaves are never sorted, moved or
//! removed. when a level has an odd number of nodes the last node is
//! paired with itself - at every level, not just the leaf level. this
//! duplicate-last-node convention is what the on-chain verifier
//! recomputes; zero-padding instead would make every proof unverifiable.
//!
//! one writer, many readers: the indexing process that observes accepted
//! deposits performs `insert` calls in acceptance order, and nothing else
//! mutates the tree. proof requests read a consistent snapshot - either
//! serve them behind the writer's lock or pin them to a [`Checkpoint`]
//! taken after the relevant insert completed. `insert` must not be
//! retried blindly: a duplicate insert is a new leaf, not a no-op.

pub mod proof;

pub use proof::InclusionProof;

use std::sync::Arc;

use thiserror::Error;
use veilpool_field::{FieldElement, SpongeHasher};

#[derive(Debug, Error)]
pub enum AccumulatorError {
    #[error("leaf index {index} out of range ({leaf_count} leaves)")]
    IndexOutOfRange { index: u64, leaf_count: u64 },
}

pub type Result<T> = std::result::Result<T, AccumulatorError>;

/// a root paired with the leaf count it was computed at, so proof
/// requests can be pinned to "as of root R" instead of "as of now"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub root: FieldElement,
    pub leaf_count: u64,
}

/// the accumulator: an ordered leaf sequence plus the injected hasher
pub struct MerkleAccumulator {
    hasher: Arc<SpongeHasher>,
    leaves: Vec<FieldElement>,
}

impl MerkleAccumulator {
    pub fn new(hasher: Arc<SpongeHasher>) -> Self {
        Self { hasher, leaves: Vec::new() }
    }

    /// append a commitment. never fails; depth limits are the external
    /// verifier's concern.
    pub fn insert(&mut self, commitment: FieldElement) {
        self.leaves.push(commitment);
    }

    pub fn leaf_count(&self) -> u64 {
        self.leaves.len() as u64
    }

    pub fn leaf(&self, index: u64) -> Option<&FieldElement> {
        self.leaves.get(index as usize)
    }

    /// recompute the root bottom-up. the empty tree has the zero
    /// sentinel root; a single leaf hashes with itself.
    pub fn root(&self) -> FieldElement {
        if self.leaves.is_empty() {
            return self.hasher.config().zero();
        }

        let mut level = self.leaves.clone();
        loop {
            level = self.next_level(&level);
            if let [root] = level.as_slice() {
                return root.clone();
            }
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint { root: self.root(), leaf_count: self.leaf_count() }
    }

    pub fn is_current_root(&self, root: &FieldElement) -> bool {
        self.root() == *root
    }

    /// inclusion proof for the leaf at `index`, siblings ordered
    /// leaf-level-first. out-of-range indices are an error, never a
    /// clamped or empty proof.
    pub fn proof(&self, index: u64) -> Result<InclusionProof> {
        if index >= self.leaf_count() {
            return Err(AccumulatorError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count(),
            });
        }

        let mut siblings = Vec::new();
        let mut level = self.leaves.clone();
        let mut idx = index as usize;

        loop {
            let sibling_idx = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
            // odd level end: the node is its own sibling
            let sibling = level.get(sibling_idx).unwrap_or(&level[idx]).clone();
            siblings.push(sibling);

            level = self.next_level(&level);
            idx /= 2;
            if level.len() == 1 {
                break;
            }
        }

        Ok(InclusionProof { index, siblings })
    }

    /// pair adjacent nodes, duplicating the last node of an odd level
    fn next_level(&self, level: &[FieldElement]) -> Vec<FieldElement> {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            next.push(self.hasher.hash_two(left, right));
        }
        next
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use veilpool_field::FieldConfig;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_round_trip_inclusion(
            values in prop::collection::vec(any::<u64>(), 1..48),
            pick in any::<prop::sample::Index>(),
        ) {
            let hasher = Arc::new(SpongeHasher::new(FieldConfig::stark()));
            let cfg = hasher.config().clone();
            let mut acc = MerkleAccumulator::new(hasher.clone());
            let leaves: Vec<_> = values.iter().map(|&v| cfg.element_from_u64(v)).collect();
            for leaf in &leaves {
                acc.insert(leaf.clone());
            }

            let index = pick.index(leaves.len());
            let proof = acc.proof(index as u64).unwrap();
            let root = acc.root();
            prop_assert!(proof.verify(&hasher, &leaves[index], &root));

            // and the proof does not verify a different leaf
            if leaves.len() > 1 {
                let other = (index + 1) % leaves.len();
                if leaves[other] != leaves[index] {
                    prop_assert!(!proof.verify(&hasher, &leaves[other], &root));
                }
            }
        }
    }
}
