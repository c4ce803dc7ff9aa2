//! relay-side adapters for the veilpool privacy pool
//!
//! the crypto crates are pure; this crate is where the outside world
//! shows up. it holds the replay cache that deduplicates in-flight
//! withdrawal requests, the JSON-RPC client that mirrors freshly
//! computed accumulator roots on-chain, and the configuration that
//! threads one field modulus through all of it.
//!
//! the chain indexer that feeds `insert` calls in acceptance order is an
//! external collaborator; the operator binary here takes commitments and
//! roots as arguments instead of watching events.

pub mod config;
pub mod error;
pub mod publisher;
pub mod replay;

pub use config::RelayConfig;
pub use error::{RelayError, Result, UpstreamError};
pub use publisher::{RootPublisher, TxAck};
pub use replay::ReplayCache;
