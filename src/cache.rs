//! In-memory caching using moka
//!
//! Space details are read on every quote and submission but change rarely,
//! so they are cached for a short TTL. Only backend reads are cached; quotes
//! are always recomputed.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::backend::{BackendClient, BackendResult};
use crate::booking::models::Space;
use crate::config::Config;

/// Application cache holding space records
#[derive(Clone)]
pub struct AppCache {
    /// Spaces (space id -> Space)
    pub spaces: Cache<String, Arc<Space>>,
}

impl AppCache {
    pub fn new(config: &Config) -> Self {
        Self {
            spaces: Cache::builder()
                .max_capacity(config.space_cache_capacity)
                .time_to_live(config.space_cache_ttl)
                .build(),
        }
    }

    /// Cached space, fetched from the backend on a miss
    pub async fn space(&self, backend: &BackendClient, space_id: &str) -> BackendResult<Arc<Space>> {
        if let Some(cached) = self.spaces.get(space_id).await {
            debug!("Cache HIT for space: {}", space_id);
            return Ok(cached);
        }

        debug!("Cache MISS for space: {}", space_id);
        let space = Arc::new(backend.get_space(space_id).await?);
        self.spaces.insert(space_id.to_string(), space.clone()).await;
        Ok(space)
    }

    /// Invalidate a specific space
    pub async fn invalidate_space(&self, space_id: &str) {
        self.spaces.invalidate(space_id).await;
        info!("Cache invalidated for space: {}", space_id);
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.spaces.invalidate_all();
        info!("All caches invalidated");
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            spaces_size: self.spaces.entry_count(),
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub spaces_size: u64,
}
