//! In-page components of the gate pages.
//!
//! These run against the [`page::Page`] port rather than a concrete DOM:
//!
//! - [`ad_loader`] - Script/iframe ad loading with timeout, retry and fallback
//! - [`blocker`] - Ad blocker detection and the blocking overlay
//! - [`settle`] - Write-once completion shared by timers and load events

pub mod ad_loader;
pub mod blocker;
pub mod page;
pub mod settle;

#[cfg(test)]
mod mocks;

pub use ad_loader::{AdLoadError, AdLoader, AdSlot, BannerOptions, ScriptOptions, SlotOutcome};
pub use blocker::{BlockerDetector, Detection, check_ad_block};
pub use page::{IframeSpec, LoadEvent, LoadListener, NodeId, Page};
