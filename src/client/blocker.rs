//! Ad blocker detection and the blocking overlay.
//!
//! One detection pass produces a [`Detection`] value. [`BlockerDetector::run`]
//! uses it to decide on the overlay and [`check_ad_block`] reports it to
//! callers that only want the answer.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::page::{LoadEvent, Page};
use crate::client::settle::{Watch, watch};

/// Class names matched by common blocklist cosmetic filters.
pub const BAIT_CLASSES: &str = "adsbox ad-banner ad-placeholder pub_300x250 pub_300x250m \
                                pub_728x90 text-ad textAd text_ad text_ads text-ads text-ad-links";

pub const BAIT_STYLE: &str = "width: 1px !important; height: 1px !important; \
                              position: absolute !important; left: -10000px !important; \
                              top: -1000px !important;";

/// Time blocking rules get to hide the bait.
pub const BAIT_DELAY: Duration = Duration::from_millis(100);

pub const PROBE_URL: &str = "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js";

/// A probe still pending after this long counts as inconclusive.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Delay before [`check_ad_block`] reports.
pub const CHECK_DELAY: Duration = Duration::from_millis(200);

pub const WARNING_OVERLAY_ID: &str = "adblock-warning";

const WARNING_HTML: &str = r#"<style>
#adblock-warning { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.9); display: flex; align-items: center; justify-content: center; z-index: 99999; }
.adblock-modal { background: #fff; padding: 40px; border-radius: 20px; max-width: 500px; text-align: center; }
.adblock-modal h2 { color: #d63031; }
.adblock-steps { background: #f5f6fa; padding: 20px; border-radius: 10px; margin: 20px 0; text-align: left; }
</style>
<div class="adblock-modal">
  <h2>Ad Blocker Detected</h2>
  <p>This service is free because of ads.</p>
  <p>Please disable your ad blocker and refresh the page to continue.</p>
  <div class="adblock-steps">
    <h4>How to disable:</h4>
    <ol>
      <li>Click on your ad blocker icon in the browser toolbar</li>
      <li>Select "Disable on this site" or "Pause"</li>
      <li>Refresh this page</li>
    </ol>
  </div>
  <button id="refreshBtn" type="button" onclick="window.location.reload()">I've Disabled It - Refresh</button>
</div>"#;

/// Signals gathered by one detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detection {
    /// The bait element was detached or rendered with zero size.
    pub bait_hidden: bool,
    /// The ad network probe script fired its error event.
    pub probe_failed: bool,
    /// The browser reports built-in ad blocking.
    pub builtin_blocker: bool,
}

impl Detection {
    pub fn blocked(&self) -> bool {
        self.bait_hidden || self.probe_failed || self.builtin_blocker
    }
}

#[derive(Debug, Clone)]
pub struct BlockerDetector {
    page: Arc<dyn Page>,
    probe_url: String,
}

impl BlockerDetector {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self {
            page,
            probe_url: PROBE_URL.to_string(),
        }
    }

    pub fn with_probe_url(mut self, url: impl Into<String>) -> Self {
        self.probe_url = url.into();
        self
    }

    /// Runs the bait, probe and built-in checks once.
    pub async fn detect(&self) -> Detection {
        let bait = self.page.insert_bait(BAIT_CLASSES, BAIT_STYLE);
        tokio::time::sleep(BAIT_DELAY).await;

        let bait_hidden = match self.page.rendered_size(bait) {
            None => true,
            Some((width, height)) => width == 0 || height == 0,
        };
        self.page.remove_node(bait);

        let (probe, outcome) = watch(PROBE_TIMEOUT, |listener| {
            self.page.append_script(&self.probe_url, true, listener)
        })
        .await;
        self.page.remove_node(probe);

        let probe_failed = match outcome {
            Watch::Event(LoadEvent::Error) => true,
            Watch::Event(LoadEvent::Load) => false,
            Watch::TimedOut => {
                debug!(url = %self.probe_url, "Ad probe inconclusive");
                false
            }
        };

        let detection = Detection {
            bait_hidden,
            probe_failed,
            builtin_blocker: self.page.has_builtin_blocker(),
        };
        debug!(?detection, "Blocker detection finished");
        detection
    }

    /// Detects and, if blocked, covers the page with the warning overlay.
    pub async fn run(&self) -> Detection {
        let detection = self.detect().await;
        if detection.blocked() {
            self.show_warning();
        }
        detection
    }

    /// Shows the full-screen warning and locks scrolling.
    ///
    /// Returns `false` if the overlay was already present.
    pub fn show_warning(&self) -> bool {
        if !self.page.show_overlay(WARNING_OVERLAY_ID, WARNING_HTML) {
            return false;
        }
        self.page.set_scroll_locked(true);
        warn!("Ad blocker detected, page interaction blocked");
        true
    }
}

/// Reports `detection.blocked()` to `callback` after [`CHECK_DELAY`].
///
/// Never shows the overlay.
pub async fn check_ad_block<F>(detection: &Detection, callback: F)
where
    F: FnOnce(bool),
{
    let blocked = detection.blocked();
    tokio::time::sleep(CHECK_DELAY).await;
    info!(blocked, "Ad block check");
    callback(blocked);
}
