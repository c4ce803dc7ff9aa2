//! relay configuration
//!
//! one struct, built from CLI flags (with env fallbacks) in the binary.
//! the field modulus lives here as a string exactly once; parsing it
//! into a [`FieldConfig`] is the constructor-time check that every
//! component downstream shares the same field.

use std::path::PathBuf;
use std::time::Duration;

use veilpool_field::{FieldConfig, SpongeHasher};

use crate::error::Result;

#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// JSON-RPC endpoint of the relay account
    pub rpc_url: String,
    /// address of the accumulator mirror contract
    pub accumulator_contract: String,
    /// directory for the replay cache database
    pub cache_path: PathBuf,
    /// field modulus, decimal or 0x-hex
    pub field_prime: String,
    /// lifetime of replay-cache entries
    pub replay_ttl: Duration,
}

impl RelayConfig {
    pub fn field_config(&self) -> Result<FieldConfig> {
        Ok(FieldConfig::parse(&self.field_prime)?)
    }

    pub fn hasher(&self) -> Result<SpongeHasher> {
        Ok(SpongeHasher::new(self.field_config()?))
    }
}
