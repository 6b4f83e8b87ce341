//! Short link creation and lookup service.

use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::id_generator::{DEFAULT_ID_LENGTH, generate_short_id, is_valid_short_id};
use crate::utils::url_check::check_destination;
use serde_json::json;
use tracing::{debug, info, warn};

/// Number of identifiers tried before giving up on a shorten request.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service for creating and retrieving short links.
///
/// Combines the identifier generator with the identifier store.
pub struct LinkService {
    repository: Arc<dyn ShortLinkRepository>,
    id_length: usize,
}

impl LinkService {
    /// Creates a new link service producing identifiers of the default length.
    pub fn new(repository: Arc<dyn ShortLinkRepository>) -> Self {
        Self::with_id_length(repository, DEFAULT_ID_LENGTH)
    }

    /// Creates a new link service producing identifiers of `id_length` characters.
    pub fn with_id_length(repository: Arc<dyn ShortLinkRepository>, id_length: usize) -> Self {
        Self {
            repository,
            id_length,
        }
    }

    /// Shortens `original_url`.
    ///
    /// # Code Generation
    ///
    /// Tries up to [`MAX_GENERATION_ATTEMPTS`] random identifiers. Each
    /// candidate is checked for existence, then stored with an atomic
    /// insert-if-absent, so a candidate claimed by a concurrent request
    /// between the check and the insert counts as one more collision rather
    /// than a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL is not an absolute
    /// http(s) URL; nothing is written in that case.
    ///
    /// Returns [`AppError::GenerationExhausted`] if every candidate collided.
    pub async fn shorten(&self, original_url: &str) -> Result<ShortLink, AppError> {
        let original_url = check_destination(original_url).map_err(|e| {
            AppError::invalid_input("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let short_id = generate_short_id(self.id_length);

            if self.repository.exists(&short_id).await? {
                debug!(attempt, "Short id {} already taken", short_id);
                continue;
            }

            let new_link = NewShortLink {
                short_id,
                original_url: original_url.to_string(),
            };

            match self.repository.insert_if_absent(new_link).await? {
                Some(link) => {
                    metrics::counter!("links_created_total").increment(1);
                    info!(short_id = %link.short_id, "Short link created");
                    return Ok(link);
                }
                None => {
                    debug!(attempt, "Short id claimed concurrently, retrying");
                }
            }
        }

        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Failed to generate unique short id"
        );

        Err(AppError::generation_exhausted(
            "Failed to generate unique ID",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its short identifier without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown, malformed or reserved identifiers.
    pub async fn get_link(&self, short_id: &str) -> Result<ShortLink, AppError> {
        if !is_valid_short_id(short_id) {
            return Err(link_not_found(short_id));
        }

        self.repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| link_not_found(short_id))
    }

    /// Builds the shareable URL for `short_id`.
    pub fn short_url(&self, base_url: &str, short_id: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_id)
    }

    /// Number of stored links.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Most clicked links, highest first.
    pub async fn top_links(&self, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        self.repository.top_by_clicks(limit.max(1)).await
    }
}

pub(crate) fn link_not_found(short_id: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "short_id": short_id }))
}
