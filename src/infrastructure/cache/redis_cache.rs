//! Redis-backed destination cache.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

const KEY_PREFIX: &str = "link:";

/// Caches `short_id → original_url` under `link:{short_id}` with a TTL.
///
/// Entries never go stale: a short link's destination cannot change once
/// stored, so the TTL only bounds memory use.
pub struct RedisCache {
    manager: ConnectionManager,
    default_ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis and checks the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::ConnectionError(format!("Invalid Redis URL: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::ConnectionError(e.to_string()))?;

        let cache = Self {
            manager,
            default_ttl_seconds,
        };

        if !cache.health_check().await {
            return Err(CacheError::ConnectionError("Redis PING failed".to_string()));
        }

        info!("Connected to Redis");
        Ok(cache)
    }
}

fn cache_key(short_id: &str) -> String {
    format!("{KEY_PREFIX}{short_id}")
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_id: &str) -> CacheResult<Option<String>> {
        let mut conn = self.manager.clone();

        let url: Option<String> = conn
            .get(cache_key(short_id))
            .await
            .map_err(|e| CacheError::OperationError(format!("GET {short_id}: {e}")))?;

        debug!(short_id, hit = url.is_some(), "Redis lookup");
        Ok(url)
    }

    async fn set_url(
        &self,
        short_id: &str,
        original_url: &str,
        ttl: Option<usize>,
    ) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        let ttl_seconds = ttl.map_or(self.default_ttl_seconds, |t| t as u64);

        conn.set_ex::<_, _, ()>(cache_key(short_id), original_url, ttl_seconds)
            .await
            .map_err(|e| CacheError::OperationError(format!("SET {short_id}: {e}")))?;

        debug!(short_id, ttl_seconds, "Redis store");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.manager.clone();
        conn.ping::<()>().await.is_ok()
    }
}
