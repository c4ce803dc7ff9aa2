//! prime field layer for veilpool
//!
//! every value that flows through the pool - commitments, nullifiers,
//! merkle nodes, proof siblings - is an element of one prime field.
//! the field modulus is configuration, not a constant scattered through
//! the code: a [`FieldConfig`] is built once (normally from the relay
//! config) and handed to every component that needs arithmetic.
//!
//! [`SpongeHasher`] is the single hash primitive everything else is
//! derived from. it is pure and shareable; clone the config or wrap the
//! hasher in an `Arc` rather than reaching for a global.

pub mod config;
pub mod element;
pub mod hasher;

pub use config::FieldConfig;
pub use element::FieldElement;
pub use hasher::SpongeHasher;

use thiserror::Error;

/// default field modulus: the ~2^251 STARK prime,
/// 2^251 + 17 * 2^192 + 1. this is the only place the numeral appears.
pub const STARK_PRIME_DEC: &str =
    "3618502788666131213697322783095070105623107215331596699973092056135872020481";

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid field element encoding: {0}")]
    InvalidHex(String),

    #[error("invalid field modulus: {0}")]
    InvalidPrime(String),
}

pub type Result<T> = std::result::Result<T, FieldError>;
