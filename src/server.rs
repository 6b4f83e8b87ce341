//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, cache setup, the CAPTCHA client and the Axum
//! server lifecycle.

use crate::application::services::{GateService, LinkService};
use crate::config::{Config, StorageBackend};
use crate::domain::captcha::CaptchaVerifier;
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::captcha::RecaptchaVerifier;
use crate::infrastructure::persistence::{InMemoryShortLinkRepository, PgShortLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL with migrations, or in-memory)
/// - Redis cache (or NullCache fallback)
/// - reCAPTCHA verifier
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;
    let cache = build_cache(&config).await;

    let captcha: Arc<dyn CaptchaVerifier> = Arc::new(RecaptchaVerifier::new(
        &config.recaptcha_verify_url,
        &config.recaptcha_secret_key,
        Duration::from_secs(config.captcha_timeout_seconds),
    )?);

    let link_service = Arc::new(LinkService::with_id_length(
        repository.clone(),
        config.short_id_length,
    ));
    let gate_service = Arc::new(GateService::new(repository, cache.clone(), captcha));

    let state = AppState::new(
        link_service,
        gate_service,
        cache,
        config.base_url.clone(),
        config.recaptcha_site_key.clone(),
    )
    .with_behind_proxy(config.behind_proxy)
    .with_ads(config.ads.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &Config) -> Result<Arc<dyn ShortLinkRepository>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            Ok(Arc::new(InMemoryShortLinkRepository::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres storage backend")?;

            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgShortLinkRepository::new(Arc::new(pool))))
        }
    }
}

/// Opens a PostgreSQL pool with the configured limits.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
