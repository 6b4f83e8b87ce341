//! Ad script and iframe loading with timeout, retry and fallback markup.
//!
//! Every load settles exactly once: the first of the node's load event, its
//! error event or the timeout wins, and later signals are dropped.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, error, info, warn};

use crate::client::page::{IframeSpec, LoadEvent, NodeId, Page};
use crate::client::settle::{Watch, watch};

pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(7);
pub const DEFAULT_SCRIPT_RETRIES: u32 = 1;
/// Pause between a failed script attempt and the next one.
pub const RETRY_PAUSE: Duration = Duration::from_millis(500);

pub const IFRAME_TIMEOUT: Duration = Duration::from_secs(7);
pub const DEFAULT_IFRAME_WIDTH: u32 = 320;
pub const DEFAULT_IFRAME_HEIGHT: u32 = 50;

pub const SOCIAL_BAR_TIMEOUT: Duration = Duration::from_secs(7);
pub const SOCIAL_BAR_RETRIES: u32 = 2;
/// Time a loaded social bar script gets to render into its container.
pub const SOCIAL_BAR_GRACE: Duration = Duration::from_millis(800);

pub const DEFAULT_AD_FALLBACK: &str = r#"<div class="ad-fallback">Advertisement</div>"#;
pub const DEFAULT_SOCIAL_FALLBACK: &str = r#"<div class="social-fallback">Connect</div>"#;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdLoadError {
    #[error("Timed out loading {0}")]
    Timeout(String),

    #[error("Failed to load {0}")]
    Failed(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Extra attempts after the first one fails.
    pub retries: u32,
    pub is_async: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SCRIPT_TIMEOUT,
            retries: DEFAULT_SCRIPT_RETRIES,
            is_async: true,
        }
    }
}

/// What to load into a banner container.
///
/// The iframe is tried first, then the script, then the fallback markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerOptions {
    pub container_id: String,
    pub iframe_src: Option<String>,
    pub script_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Markup rendered when nothing loads. Defaults to [`DEFAULT_AD_FALLBACK`].
    pub fallback_html: Option<String>,
    pub script: ScriptOptions,
}

impl BannerOptions {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            ..Self::default()
        }
    }

    pub fn with_iframe(mut self, src: impl Into<String>) -> Self {
        self.iframe_src = Some(src.into());
        self
    }

    pub fn with_script(mut self, url: impl Into<String>) -> Self {
        self.script_url = Some(url.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_fallback(mut self, html: impl Into<String>) -> Self {
        self.fallback_html = Some(html.into());
        self
    }
}

/// Which source ended up filling a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    Iframe,
    Script,
    Fallback,
}

/// Terminal state of a container after a composed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdSlot {
    pub container_id: String,
    pub outcome: SlotOutcome,
}

/// Loads third-party ad content into page containers.
#[derive(Debug, Clone)]
pub struct AdLoader {
    page: Arc<dyn Page>,
}

impl AdLoader {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    /// Appends a script, retrying on error or timeout.
    ///
    /// Makes `options.retries + 1` attempts at most, pausing [`RETRY_PAUSE`]
    /// between them. A failed attempt's node is removed before the next one.
    ///
    /// # Errors
    ///
    /// The last attempt's [`AdLoadError::Timeout`] or [`AdLoadError::Failed`].
    pub async fn load_script(
        &self,
        url: &str,
        options: ScriptOptions,
    ) -> Result<NodeId, AdLoadError> {
        info!(url, retries = options.retries, "Loading script");

        let strategy = FixedInterval::new(RETRY_PAUSE).take(options.retries as usize);
        let mut attempt = 0u32;

        let result = Retry::spawn(strategy, || {
            attempt += 1;
            load_script_once(Arc::clone(&self.page), url.to_string(), options, attempt)
        })
        .await;

        if let Err(e) = &result {
            error!(url, attempts = attempt, "Script load gave up: {}", e);
        }
        result
    }

    /// Clears a container and loads an iframe into it.
    ///
    /// Settles on the frame's load or error event, or after [`IFRAME_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// [`AdLoadError::ContainerNotFound`], [`AdLoadError::Failed`] or
    /// [`AdLoadError::Timeout`].
    pub async fn insert_iframe(
        &self,
        container_id: &str,
        spec: &IframeSpec,
    ) -> Result<NodeId, AdLoadError> {
        debug!(container_id, src = %spec.src, "Inserting iframe");

        if !self.page.set_container_html(container_id, "") {
            warn!(container_id, "Container not found");
            return Err(AdLoadError::ContainerNotFound(container_id.to_string()));
        }

        let (node, outcome) = watch(IFRAME_TIMEOUT, |listener| {
            self.page.insert_iframe(container_id, spec, listener)
        })
        .await;

        let node = node.ok_or_else(|| AdLoadError::ContainerNotFound(container_id.to_string()))?;

        match outcome {
            Watch::Event(LoadEvent::Load) => {
                info!(src = %spec.src, "Iframe loaded");
                Ok(node)
            }
            Watch::Event(LoadEvent::Error) => {
                error!(src = %spec.src, "Iframe failed");
                Err(AdLoadError::Failed(spec.src.clone()))
            }
            Watch::TimedOut => {
                error!(src = %spec.src, "Iframe load timeout");
                Err(AdLoadError::Timeout(spec.src.clone()))
            }
        }
    }

    /// Renders placeholder markup into a container.
    ///
    /// Returns `false` if the container does not exist.
    pub fn show_fallback(&self, container_id: &str, html: Option<&str>) -> bool {
        let rendered = self
            .page
            .set_container_html(container_id, html.unwrap_or(DEFAULT_AD_FALLBACK));

        if !rendered {
            warn!(container_id, "Failed to render fallback");
        }
        rendered
    }

    /// Fills a banner container from the best available source.
    ///
    /// Resolves once the container holds loaded content or fallback markup.
    ///
    /// # Errors
    ///
    /// Only [`AdLoadError::ContainerNotFound`].
    pub async fn load_banner(&self, options: BannerOptions) -> Result<AdSlot, AdLoadError> {
        let container_id = options.container_id.as_str();
        info!(container_id, "Loading banner");

        if !self.page.has_container(container_id) {
            warn!(container_id, "Container not found");
            return Err(AdLoadError::ContainerNotFound(container_id.to_string()));
        }

        if let Some(src) = &options.iframe_src {
            let spec = IframeSpec {
                src: src.clone(),
                width: options.width.unwrap_or(DEFAULT_IFRAME_WIDTH),
                height: options.height.unwrap_or(DEFAULT_IFRAME_HEIGHT),
            };

            match self.insert_iframe(container_id, &spec).await {
                Ok(_) => return Ok(slot(container_id, SlotOutcome::Iframe)),
                Err(AdLoadError::ContainerNotFound(id)) => {
                    return Err(AdLoadError::ContainerNotFound(id));
                }
                Err(e) => warn!(container_id, "Iframe failed, falling back: {}", e),
            }
        }

        if let Some(url) = &options.script_url {
            match self.load_script(url, options.script).await {
                Ok(_) => return Ok(slot(container_id, SlotOutcome::Script)),
                Err(e) => error!(container_id, "Banner script failed: {}", e),
            }
        }

        self.show_fallback(container_id, options.fallback_html.as_deref());
        Ok(slot(container_id, SlotOutcome::Fallback))
    }

    /// Loads a self-rendering social bar script.
    ///
    /// After a successful load the script gets [`SOCIAL_BAR_GRACE`] to fill
    /// the container; a container that is still blank gets the fallback. A
    /// failed load renders the fallback immediately.
    ///
    /// # Errors
    ///
    /// Only [`AdLoadError::ContainerNotFound`].
    pub async fn load_social_bar(
        &self,
        script_url: &str,
        container_id: &str,
        fallback_html: Option<&str>,
    ) -> Result<AdSlot, AdLoadError> {
        info!(script_url, container_id, "Loading social bar");

        if !self.page.has_container(container_id) {
            warn!(container_id, "Social container not found");
            return Err(AdLoadError::ContainerNotFound(container_id.to_string()));
        }

        let fallback = fallback_html.unwrap_or(DEFAULT_SOCIAL_FALLBACK);
        let options = ScriptOptions {
            timeout: SOCIAL_BAR_TIMEOUT,
            retries: SOCIAL_BAR_RETRIES,
            is_async: true,
        };

        if let Err(e) = self.load_script(script_url, options).await {
            warn!(container_id, "Social script failed: {}", e);
            self.page.set_container_html(container_id, fallback);
            return Ok(slot(container_id, SlotOutcome::Fallback));
        }

        tokio::time::sleep(SOCIAL_BAR_GRACE).await;

        let blank = self
            .page
            .container_html(container_id)
            .is_none_or(|html| html.trim().is_empty());

        if blank {
            warn!(container_id, "Social script loaded but container empty");
            self.page.set_container_html(container_id, fallback);
            return Ok(slot(container_id, SlotOutcome::Fallback));
        }

        Ok(slot(container_id, SlotOutcome::Script))
    }
}

fn slot(container_id: &str, outcome: SlotOutcome) -> AdSlot {
    AdSlot {
        container_id: container_id.to_string(),
        outcome,
    }
}

async fn load_script_once(
    page: Arc<dyn Page>,
    url: String,
    options: ScriptOptions,
    attempt: u32,
) -> Result<NodeId, AdLoadError> {
    debug!(url = %url, attempt, "Script attempt");

    let (node, outcome) = watch(options.timeout, |listener| {
        page.append_script(&url, options.is_async, listener)
    })
    .await;

    match outcome {
        Watch::Event(LoadEvent::Load) => {
            info!(url = %url, attempt, "Script loaded");
            Ok(node)
        }
        Watch::Event(LoadEvent::Error) => {
            page.remove_node(node);
            warn!(url = %url, attempt, "Script load error");
            Err(AdLoadError::Failed(url))
        }
        Watch::TimedOut => {
            page.remove_node(node);
            warn!(url = %url, attempt, "Script timeout");
            Err(AdLoadError::Timeout(url))
        }
    }
}
