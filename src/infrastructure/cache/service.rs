//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short identifier → destination URL mappings.
///
/// Consulted by the later gate steps and the verify step; the first gate
/// step always goes to the store because it updates the click counter.
/// Cache failures degrade to store lookups.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the destination URL for a short identifier.
    ///
    /// `Ok(None)` is a miss.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails; callers fall back to
    /// the store.
    async fn get_url(&self, short_id: &str) -> CacheResult<Option<String>>;

    /// Stores a destination, expiring after `ttl_seconds` or the
    /// implementation's default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails. Callers log and move on.
    async fn set_url(
        &self,
        short_id: &str,
        original_url: &str,
        ttl_seconds: Option<usize>,
    ) -> CacheResult<()>;

    /// Reports whether the backend answers. Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
