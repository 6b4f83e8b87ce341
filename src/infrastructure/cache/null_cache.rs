//! Cache used when Redis is not configured.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;

/// Stores nothing and always misses, so every lookup reaches the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _short_id: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _short_id: &str, _url: &str, _ttl: Option<usize>) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();

        cache
            .set_url("Ab3dE9", "https://example.com/a", None)
            .await
            .unwrap();

        assert_eq!(cache.get_url("Ab3dE9").await.unwrap(), None);
        assert!(cache.health_check().await);
    }
}
