//! Cache-first access to game records.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use game_core::GameRecord;

use crate::cache::ResultCache;
use crate::fetcher::DataFetcher;
use crate::transport::FetchError;

/// Serves game records from the [`ResultCache`], fetching on a miss.
///
/// Construct one per process and share it by reference. Concurrent misses on
/// the same id are not deduplicated; both fetches land in the cache.
pub struct GameService {
    fetcher: DataFetcher,
    cache: Mutex<ResultCache>,
}

impl GameService {
    pub fn new(fetcher: DataFetcher, cache: ResultCache) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(cache),
        }
    }

    /// Cached record for `id`, or fetch, decode and cache it.
    ///
    /// Failed fetches are returned as-is and leave the cache untouched.
    pub async fn fetch_or_get(&self, id: &str) -> Result<Arc<GameRecord>, FetchError> {
        if let Some(record) = self.peek(id) {
            tracing::debug!("Game {} served from cache", id);
            return Ok(record);
        }

        let record = self.fetcher.game(id).await.inspect_err(|err| {
            tracing::warn!("Failed to fetch game {}: {}", id, err);
        })?;

        Ok(self.lock_cache().insert(record))
    }

    /// Cached record for `id`. Never touches the network.
    pub fn peek(&self, id: &str) -> Option<Arc<GameRecord>> {
        self.lock_cache().get(id)
    }

    pub fn cached_ids(&self) -> Vec<String> {
        self.lock_cache().ids().map(str::to_string).collect()
    }

    pub fn fetcher(&self) -> &DataFetcher {
        &self.fetcher
    }

    // Insert-and-evict happens under one guard; the lock is never held across an await.
    fn lock_cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
