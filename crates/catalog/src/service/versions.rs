//! Per-key write versions that keep detached cache fills from resurrecting
//! stale entries.
//!
//! A read records the key's version before it queries the store. Its fill
//! only writes when the version is unchanged. Writers bump the version and
//! delete the entry under the same lock, once inside the transaction and once
//! after commit, so a fill either lands before an invalidation (and is
//! deleted by it) or observes the bump (and is skipped).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use catalog_core::cache::{Cache, CacheError};

#[derive(Clone, Default)]
pub struct CacheVersions {
    versions: Arc<Mutex<HashMap<String, u64>>>,
}

impl CacheVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version of `key` as seen by a read that is about to hit the store.
    pub async fn current(&self, key: &str) -> u64 {
        self.versions.lock().await.get(key).copied().unwrap_or(0)
    }

    /// Bumps the version of `key` and deletes its entry.
    pub async fn invalidate(&self, cache: &dyn Cache, key: &str) -> Result<(), CacheError> {
        let mut versions = self.versions.lock().await;
        *versions.entry(key.to_string()).or_insert(0) += 1;
        cache.delete(key).await
    }

    /// Writes `value` only if no invalidation happened since `seen` was read.
    ///
    /// Returns `Ok(false)` when the fill was skipped.
    pub async fn fill(
        &self,
        cache: &dyn Cache,
        key: &str,
        value: &[u8],
        ttl: Duration,
        seen: u64,
    ) -> Result<bool, CacheError> {
        let versions = self.versions.lock().await;
        if versions.get(key).copied().unwrap_or(0) != seen {
            return Ok(false);
        }
        cache.set(key, value, Some(ttl)).await?;
        Ok(true)
    }
}
