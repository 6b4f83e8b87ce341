//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{GateService, LinkService};
use crate::infrastructure::cache::CacheService;
use crate::web::AdSettings;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub gate_service: Arc<GateService>,
    pub cache: Arc<dyn CacheService>,
    /// Prefix for generated short URLs, e.g. `https://s.example.com`.
    pub base_url: String,
    /// Public CAPTCHA key rendered into the third gate page.
    pub captcha_site_key: String,
    /// Trust forwarded-for headers when resolving the client address.
    pub behind_proxy: bool,
    /// Ad sources wired into the gate pages.
    pub ads: AdSettings,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        gate_service: Arc<GateService>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
        captcha_site_key: impl Into<String>,
    ) -> Self {
        Self {
            link_service,
            gate_service,
            cache,
            base_url: base_url.into(),
            captcha_site_key: captcha_site_key.into(),
            behind_proxy: false,
            ads: AdSettings::default(),
        }
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }

    pub fn with_ads(mut self, ads: AdSettings) -> Self {
        self.ads = ads;
        self
    }
}
