//! replay cache
//!
//! a persistent key-value store recording which transactions and
//! withdrawal requests were already handled, with a time-to-live. this
//! is deliberately not permanent spend tracking - the nullifier scheme
//! on-chain owns that. the cache only stops the same off-chain action
//! from being relayed twice inside a bounded window, so entries expire
//! and keys become reusable.
//!
//! concurrent writers coordinate through [`ReplayCache::mark_if_absent`],
//! which is atomic: of two racing withdrawal attempts for one nullifier,
//! exactly one observes "claimed".

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Result;

/// default entry lifetime: one hour
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// key namespace for locally relayed transactions
pub fn tx_key(hash: &str) -> String {
    format!("tx:{hash}")
}

/// key namespace for transactions observed on-chain
pub fn chain_tx_key(hash: &str) -> String {
    format!("chain:tx:{hash}")
}

/// sled-backed dedup store with per-entry expiry
pub struct ReplayCache {
    db: sled::Db,
}

impl ReplayCache {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// record `key` as processed for `ttl`, unconditionally
    /// (last writer wins)
    pub fn mark(&self, key: &str, ttl: Duration) -> Result<()> {
        let expiry = now_millis().saturating_add(as_millis(ttl));
        self.db.insert(key.as_bytes(), &expiry.to_be_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    /// atomically claim `key` if no live entry exists. returns whether
    /// this caller won the claim.
    pub fn mark_if_absent(&self, key: &str, ttl: Duration) -> Result<bool> {
        let now = now_millis();
        let value = now.saturating_add(as_millis(ttl)).to_be_bytes().to_vec();

        loop {
            let current = self.db.get(key.as_bytes())?;
            if let Some(raw) = &current {
                if !is_expired(raw, now) {
                    return Ok(false);
                }
            }
            // absent or expired: swap our entry in, retrying on races
            let swapped = self
                .db
                .compare_and_swap(key.as_bytes(), current, Some(value.clone()))?;
            if swapped.is_ok() {
                self.db.flush()?;
                return Ok(true);
            }
        }
    }

    /// whether a live (unexpired) entry exists for `key`
    pub fn is_processed(&self, key: &str) -> Result<bool> {
        let now = now_millis();
        match self.db.get(key.as_bytes())? {
            Some(raw) if !is_expired(&raw, now) => Ok(true),
            Some(raw) => {
                // lazy purge; best effort, a racing fresh write survives
                let _ = self.db.compare_and_swap(
                    key.as_bytes(),
                    Some(raw),
                    None::<sled::IVec>,
                )?;
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

fn as_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn is_expired(raw: &[u8], now: u64) -> bool {
    match <[u8; 8]>::try_from(raw) {
        Ok(bytes) => u64::from_be_bytes(bytes) <= now,
        // unreadable entry: treat as expired so it gets replaced
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> (tempfile::TempDir, ReplayCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReplayCache::open(dir.path()).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_mark_then_processed() {
        let (_dir, cache) = cache();
        assert!(!cache.is_processed("tx:abc").unwrap());
        cache.mark("tx:abc", DEFAULT_TTL).unwrap();
        assert!(cache.is_processed("tx:abc").unwrap());
        // unrelated key untouched
        assert!(!cache.is_processed("tx:def").unwrap());
    }

    #[test]
    fn test_ttl_expiry() {
        let (_dir, cache) = cache();
        cache.mark("k", Duration::from_millis(60)).unwrap();
        assert!(cache.is_processed("k").unwrap());

        std::thread::sleep(Duration::from_millis(120));
        assert!(!cache.is_processed("k").unwrap());

        // expired key is reusable
        assert!(cache.mark_if_absent("k", DEFAULT_TTL).unwrap());
        assert!(cache.is_processed("k").unwrap());
    }

    #[test]
    fn test_mark_if_absent_claims_once() {
        let (_dir, cache) = cache();
        assert!(cache.mark_if_absent("n:1", DEFAULT_TTL).unwrap());
        assert!(!cache.mark_if_absent("n:1", DEFAULT_TTL).unwrap());
        assert!(cache.is_processed("n:1").unwrap());
    }

    #[test]
    fn test_concurrent_claims_single_winner() {
        let (_dir, cache) = cache();
        let cache = std::sync::Arc::new(cache);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                cache.mark_if_absent("n:race", DEFAULT_TTL).unwrap()
            }));
        }
        let wins: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_key_namespaces_disjoint() {
        let (_dir, cache) = cache();
        cache.mark(&tx_key("feed"), DEFAULT_TTL).unwrap();
        assert!(cache.is_processed("tx:feed").unwrap());
        assert!(!cache.is_processed(&chain_tx_key("feed")).unwrap());
    }

    #[test]
    fn test_corrupt_entry_reads_as_absent() {
        let (_dir, cache) = cache();
        cache.db.insert(b"bad", b"not-a-timestamp".as_slice()).unwrap();
        assert!(!cache.is_processed("bad").unwrap());
        assert!(cache.mark_if_absent("bad", DEFAULT_TTL).unwrap());
    }
}
