//! veilpool relay operator CLI
//!
//! thin wrapper over the library: rebuild an accumulator from a list of
//! commitments, publish roots to the mirror contract, poke the replay
//! cache, and derive commitments/nullifiers for debugging. the event
//! indexer that does this continuously in production is a separate
//! process; this tool takes its inputs as arguments.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use veilpool_field::{SpongeHasher, STARK_PRIME_DEC};
use veilpool_merkle::MerkleAccumulator;
use veilpool_pool::{derive, Amount};
use veilpool_relay::{RelayConfig, ReplayCache, RootPublisher};

#[derive(Parser)]
#[command(name = "veilpool-relay")]
#[command(about = "operator tool for the veilpool relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON-RPC endpoint of the relay account
    #[arg(long, env = "VEILPOOL_RPC_URL", default_value = "http://localhost:5050")]
    rpc_url: String,

    /// accumulator mirror contract address
    #[arg(long, env = "VEILPOOL_ACCUMULATOR_CONTRACT", default_value = "0x0")]
    contract: String,

    /// replay cache directory
    #[arg(long, env = "VEILPOOL_CACHE_PATH", default_value = "veilpool-cache")]
    cache_path: PathBuf,

    /// field modulus, decimal or 0x-hex
    #[arg(long, env = "VEILPOOL_FIELD_PRIME", default_value = STARK_PRIME_DEC)]
    field_prime: String,

    /// replay entry lifetime in seconds
    #[arg(long, env = "VEILPOOL_REPLAY_TTL", default_value_t = 3600)]
    replay_ttl_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// publish an accumulator root to the mirror contract
    PublishRoot {
        /// 0x-hex root
        root: String,
    },
    /// rebuild the accumulator and print (or publish) its root
    ComputeRoot {
        /// 0x-hex commitments in insertion order
        commitments: Vec<String>,
        /// also publish the computed root
        #[arg(long)]
        publish: bool,
    },
    /// print a leaf's inclusion proof, siblings leaf-level first
    Prove {
        /// leaf index
        index: u64,
        /// 0x-hex commitments in insertion order
        commitments: Vec<String>,
    },
    /// check whether a replay-cache key was processed
    Check { key: String },
    /// claim a replay-cache key
    Mark { key: String },
    /// derive a deposit commitment
    Commitment {
        secret: String,
        nullifier_seed: String,
        /// 0x-hex, up to 256 bits
        amount: String,
        randomness: String,
    },
    /// derive a withdrawal nullifier
    Nullifier {
        secret: String,
        /// leaf index of the note being spent
        index: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RelayConfig {
        rpc_url: cli.rpc_url,
        accumulator_contract: cli.contract,
        cache_path: cli.cache_path,
        field_prime: cli.field_prime,
        replay_ttl: Duration::from_secs(cli.replay_ttl_secs),
    };
    let field = config.field_config()?;
    let hasher = Arc::new(SpongeHasher::new(field.clone()));

    match cli.command {
        Commands::PublishRoot { root } => {
            let root = field.element_from_hex(&root)?;
            let publisher = RootPublisher::new(&config.rpc_url, &config.accumulator_contract);
            let ack = publisher.publish_root(&root).await?;
            println!("{}", ack.transaction_hash);
        }
        Commands::ComputeRoot { commitments, publish } => {
            let mut acc = MerkleAccumulator::new(hasher.clone());
            for c in &commitments {
                acc.insert(field.element_from_hex(c)?);
            }
            let checkpoint = acc.checkpoint();
            info!(leaves = checkpoint.leaf_count, root = %checkpoint.root, "accumulator rebuilt");
            println!("{}", checkpoint.root);
            if publish {
                let publisher =
                    RootPublisher::new(&config.rpc_url, &config.accumulator_contract);
                let ack = publisher.publish_root(&checkpoint.root).await?;
                println!("{}", ack.transaction_hash);
            }
        }
        Commands::Prove { index, commitments } => {
            let mut acc = MerkleAccumulator::new(hasher.clone());
            for c in &commitments {
                acc.insert(field.element_from_hex(c)?);
            }
            let proof = acc.proof(index)?;
            for sibling in &proof.siblings {
                println!("{sibling}");
            }
        }
        Commands::Check { key } => {
            let cache = ReplayCache::open(&config.cache_path)?;
            let processed = cache.is_processed(&key)?;
            println!("{}", if processed { "processed" } else { "unseen" });
        }
        Commands::Mark { key } => {
            let cache = ReplayCache::open(&config.cache_path)?;
            let claimed = cache.mark_if_absent(&key, config.replay_ttl)?;
            println!("{}", if claimed { "claimed" } else { "already processed" });
        }
        Commands::Commitment { secret, nullifier_seed, amount, randomness } => {
            let c = derive::commitment(
                &hasher,
                &field.element_from_hex(&secret)?,
                &field.element_from_hex(&nullifier_seed)?,
                Amount::from_hex(&amount)?,
                &field.element_from_hex(&randomness)?,
            );
            println!("{c}");
        }
        Commands::Nullifier { secret, index } => {
            let n = derive::nullifier(&hasher, &field.element_from_hex(&secret)?, index);
            println!("{n}");
        }
    }

    Ok(())
}
