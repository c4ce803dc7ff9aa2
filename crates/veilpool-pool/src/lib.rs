//! veilpool commitment scheme
//!
//! pure derivations binding a depositor's secret material into the values
//! the chain sees: the commitment published at deposit time, the
//! position-bound nullifier revealed at withdrawal time, and the blinding
//! material in between. everything is a composition of
//! [`SpongeHasher`](veilpool_field::SpongeHasher) calls with fixed domain
//! separators; there is no state and no I/O.
//!
//! the chain orders, operand orders and domain separator values are a
//! wire contract with the on-chain verifier. changing any of them makes
//! every existing note unspendable.

pub mod amount;
pub mod derive;
pub mod note;

pub use amount::Amount;
pub use note::NoteSecrets;

use thiserror::Error;

/// domain separator folded into commitments
/// (field element for the ASCII bytes "SNIP_COMMITMENT")
pub const COMMITMENT_DOMAIN: u128 = 0x534e_4950_5f43_4f4d_4d49_544d_454e_54;

/// domain separator folded into nullifiers
/// (field element for the ASCII bytes "SNIP_NULLIFIER")
pub const NULLIFIER_DOMAIN: u128 = 0x53_4e49_505f_4e55_4c4c_4946_4945_52;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("invalid amount encoding: {0}")]
    InvalidAmount(String),
}

pub type Result<T> = std::result::Result<T, PoolError>;
