//! note secret material
//!
//! a depositor holds three secrets per note: the spending secret, the
//! nullifier seed, and the commitment randomness. bundling them keeps
//! the derivations in one place; nothing here is ever published.

use rand::RngCore;
use veilpool_field::{FieldConfig, FieldElement, SpongeHasher};

use crate::amount::Amount;
use crate::derive;

/// the secrets backing one shielded note
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteSecrets {
    pub secret: FieldElement,
    pub nullifier_seed: FieldElement,
    pub randomness: FieldElement,
}

impl NoteSecrets {
    pub fn new(
        secret: FieldElement,
        nullifier_seed: FieldElement,
        randomness: FieldElement,
    ) -> Self {
        Self { secret, nullifier_seed, randomness }
    }

    /// sample fresh secrets from the given rng
    pub fn generate<R: RngCore>(cfg: &FieldConfig, rng: &mut R) -> Self {
        Self {
            secret: random_element(cfg, rng),
            nullifier_seed: random_element(cfg, rng),
            randomness: random_element(cfg, rng),
        }
    }

    /// the commitment published at deposit time
    pub fn commitment(&self, h: &SpongeHasher, amount: Amount) -> FieldElement {
        derive::commitment(h, &self.secret, &self.nullifier_seed, amount, &self.randomness)
    }

    /// the nullifier revealed when spending the note at `leaf_index`
    pub fn nullifier(&self, h: &SpongeHasher, leaf_index: u64) -> FieldElement {
        derive::nullifier(h, &self.secret, leaf_index)
    }
}

fn random_element<R: RngCore>(cfg: &FieldConfig, rng: &mut R) -> FieldElement {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    cfg.element_from_bytes_be(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use veilpool_field::FieldConfig;

    #[test]
    fn test_generate_distinct_secrets() {
        let cfg = FieldConfig::stark();
        let mut rng = rand::thread_rng();
        let a = NoteSecrets::generate(&cfg, &mut rng);
        let b = NoteSecrets::generate(&cfg, &mut rng);
        assert_ne!(a, b);
        assert_ne!(a.secret, a.nullifier_seed);
    }

    #[test]
    fn test_note_derivations_match_free_functions() {
        let cfg = FieldConfig::stark();
        let h = SpongeHasher::new(cfg.clone());
        let note = NoteSecrets::new(
            cfg.element_from_u64(1),
            cfg.element_from_u64(2),
            cfg.element_from_u64(3),
        );
        let amount = Amount::from(250u64);

        assert_eq!(
            note.commitment(&h, amount),
            derive::commitment(&h, &note.secret, &note.nullifier_seed, amount, &note.randomness)
        );
        assert_eq!(note.nullifier(&h, 12), derive::nullifier(&h, &note.secret, 12));
    }
}
