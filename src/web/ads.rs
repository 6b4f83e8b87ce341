//! Ad sources handed to the in-page loader.

use serde::Serialize;

/// Ad network URLs rendered into every gate page.
///
/// Unset sources are skipped by the page script; a slot with no source
/// shows the fallback markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSettings {
    /// Banner iframe, tried first.
    pub banner_iframe_url: Option<String>,
    /// Banner script, tried when the iframe is unset or fails.
    pub banner_script_url: Option<String>,
    pub social_bar_url: Option<String>,
}

impl AdSettings {
    /// JSON read by the page script from `#ad-config`.
    pub fn page_config(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        [
            &self.banner_iframe_url,
            &self.banner_script_url,
            &self.social_bar_url,
        ]
        .into_iter()
        .filter_map(|url| url.as_deref())
    }
}
