//! Short link entity: a short identifier mapped to a destination URL.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `clicks` counts visits to the first gate step only.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortLink {
    pub id: i64,
    pub short_id: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        short_id: String,
        original_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_id,
            original_url,
            clicks,
            created_at,
        }
    }
}

/// Input data for creating a new short link. Clicks always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub short_id: String,
    pub original_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_creation() {
        let now = Utc::now();
        let link = ShortLink::new(
            1,
            "Ab3dE9".to_string(),
            "https://example.com/a".to_string(),
            0,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.short_id, "Ab3dE9");
        assert_eq!(link.original_url, "https://example.com/a");
        assert_eq!(link.clicks, 0);
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_new_short_link_creation() {
        let new_link = NewShortLink {
            short_id: "xyz789".to_string(),
            original_url: "https://rust-lang.org".to_string(),
        };

        assert_eq!(new_link.short_id, "xyz789");
        assert_eq!(new_link.original_url, "https://rust-lang.org");
    }
}
