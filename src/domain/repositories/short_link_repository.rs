//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the identifier store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortLinkRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_short_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Returns `true` if a link with this identifier is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, short_id: &str) -> Result<bool, AppError>;

    /// Finds a link by its short identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, AppError>;

    /// Inserts the link unless its identifier is already taken.
    ///
    /// Returns `Ok(None)` when another link already owns `short_id`; the
    /// existing row is left untouched. The check and the insert are one
    /// atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert_if_absent(&self, new_link: NewShortLink)
    -> Result<Option<ShortLink>, AppError>;

    /// Atomically increments the click counter and returns the updated link.
    ///
    /// Returns `Ok(None)` if no link matches `short_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, short_id: &str) -> Result<Option<ShortLink>, AppError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists the most clicked links, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn top_by_clicks(&self, limit: i64) -> Result<Vec<ShortLink>, AppError>;
}
