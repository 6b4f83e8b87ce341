//! Gate sequence service: resolves each gate step and verifies the CAPTCHA.

use std::sync::Arc;

use crate::application::services::link_service::link_not_found;
use crate::domain::captcha::CaptchaVerifier;
use crate::domain::gate::GateStep;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::id_generator::is_valid_short_id;
use serde_json::json;
use tracing::{debug, error, info, warn};

/// What a gate page needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateView {
    pub step: GateStep,
    pub short_id: String,
    /// Route of the following step.
    pub next_path: String,
    pub original_url: String,
}

/// Successful end of the gate sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRedirect {
    pub short_id: String,
    pub redirect_url: String,
}

/// Drives the gate state machine.
///
/// Holds no per-visitor state; every call re-resolves the identifier.
pub struct GateService {
    repository: Arc<dyn ShortLinkRepository>,
    cache: Arc<dyn CacheService>,
    captcha: Arc<dyn CaptchaVerifier>,
}

impl GateService {
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        cache: Arc<dyn CacheService>,
        captcha: Arc<dyn CaptchaVerifier>,
    ) -> Self {
        Self {
            repository,
            cache,
            captcha,
        }
    }

    /// Resolves a visit to one of the page steps.
    ///
    /// [`GateStep::Gate1`] increments the click counter once per call; the
    /// other steps have no side effects on the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown, malformed or reserved
    /// identifiers, and for [`GateStep::Verified`] which has no page.
    pub async fn enter(&self, step: GateStep, short_id: &str) -> Result<GateView, AppError> {
        if !is_valid_short_id(short_id) {
            return Err(link_not_found(short_id));
        }

        if step.number().is_none() {
            return Err(link_not_found(short_id));
        }

        let original_url = if step.counts_click() {
            self.record_click(short_id).await?
        } else {
            self.resolve_destination(short_id).await?
        };

        metrics::counter!("gate_visits_total", "step" => step.as_str()).increment(1);

        let next_path = step
            .next()
            .map(|next| next.path(short_id))
            .unwrap_or_default();

        Ok(GateView {
            step,
            short_id: short_id.to_string(),
            next_path,
            original_url,
        })
    }

    /// Final transition: checks the CAPTCHA token and releases the destination.
    ///
    /// The token is checked before the identifier is resolved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CaptchaRejected`] if the token is missing or the
    /// provider rejects it, and [`AppError::NotFound`] for unknown identifiers.
    pub async fn verify(
        &self,
        short_id: &str,
        captcha_token: Option<&str>,
        remote_ip: Option<String>,
    ) -> Result<VerifiedRedirect, AppError> {
        let token = captcha_token.map(str::trim).unwrap_or_default();

        let accepted = if token.is_empty() {
            debug!(short_id, "Verification without CAPTCHA token");
            false
        } else {
            self.captcha.verify(token, remote_ip).await?
        };

        if !accepted {
            metrics::counter!("captcha_verifications_total", "outcome" => "rejected").increment(1);
            warn!(short_id, "CAPTCHA verification failed");
            return Err(AppError::captcha_rejected(
                "CAPTCHA verification failed",
                json!({}),
            ));
        }

        metrics::counter!("captcha_verifications_total", "outcome" => "accepted").increment(1);

        if !is_valid_short_id(short_id) {
            return Err(link_not_found(short_id));
        }

        let redirect_url = self.resolve_destination(short_id).await?;
        info!(short_id, "Gate sequence completed");

        Ok(VerifiedRedirect {
            short_id: short_id.to_string(),
            redirect_url,
        })
    }

    async fn record_click(&self, short_id: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .increment_clicks(short_id)
            .await?
            .ok_or_else(|| link_not_found(short_id))?;

        debug!(short_id, clicks = link.clicks, "Click recorded");
        self.spawn_cache_write(short_id, &link.original_url);

        Ok(link.original_url)
    }

    /// Looks the destination up in the cache, falling back to the store.
    async fn resolve_destination(&self, short_id: &str) -> Result<String, AppError> {
        match self.cache.get_url(short_id).await {
            Ok(Some(url)) => {
                debug!("Cache HIT for {}", short_id);
                return Ok(url);
            }
            Ok(None) => debug!("Cache MISS for {}", short_id),
            Err(e) => error!("Cache error: {}", e),
        }

        let link = self
            .repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| link_not_found(short_id))?;

        self.spawn_cache_write(short_id, &link.original_url);

        Ok(link.original_url)
    }

    fn spawn_cache_write(&self, short_id: &str, original_url: &str) {
        let cache = self.cache.clone();
        let key = short_id.to_string();
        let url = original_url.to_string();

        tokio::spawn(async move {
            if let Err(e) = cache.set_url(&key, &url, None).await {
                error!("Failed to cache URL: {}", e);
            }
        });
    }
}
