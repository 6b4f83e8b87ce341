#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use link_gate::application::services::{GateService, LinkService};
use link_gate::domain::captcha::CaptchaVerifier;
use link_gate::domain::entities::NewShortLink;
use link_gate::domain::repositories::ShortLinkRepository;
use link_gate::error::AppError;
use link_gate::infrastructure::cache::NullCache;
use link_gate::infrastructure::persistence::InMemoryShortLinkRepository;
use link_gate::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";
pub const SITE_KEY: &str = "test-site-key";
pub const VALID_TOKEN: &str = "valid-token";

/// Accepts exactly [`VALID_TOKEN`] and counts calls.
#[derive(Debug, Default)]
pub struct StaticCaptcha {
    pub calls: AtomicUsize,
}

impl StaticCaptcha {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptchaVerifier for StaticCaptcha {
    async fn verify(&self, token: &str, _remote_ip: Option<String>) -> Result<bool, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(token == VALID_TOKEN)
    }
}

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryShortLinkRepository>,
    pub captcha: Arc<StaticCaptcha>,
}

pub fn create_test_state() -> TestContext {
    let repository = Arc::new(InMemoryShortLinkRepository::new());
    let captcha = Arc::new(StaticCaptcha::default());
    let cache = Arc::new(NullCache::new());

    let link_service = Arc::new(LinkService::new(repository.clone()));
    let gate_service = Arc::new(GateService::new(
        repository.clone(),
        cache.clone(),
        captcha.clone(),
    ));

    let state = AppState::new(link_service, gate_service, cache, BASE_URL, SITE_KEY);

    TestContext {
        state,
        repository,
        captcha,
    }
}

pub async fn create_test_link(repository: &InMemoryShortLinkRepository, short_id: &str, url: &str) {
    repository
        .insert_if_absent(NewShortLink {
            short_id: short_id.to_string(),
            original_url: url.to_string(),
        })
        .await
        .unwrap()
        .expect("short id already taken");
}

pub async fn clicks(repository: &InMemoryShortLinkRepository, short_id: &str) -> i64 {
    repository
        .find_by_short_id(short_id)
        .await
        .unwrap()
        .map(|link| link.clicks)
        .unwrap_or(0)
}
