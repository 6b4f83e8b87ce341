//! Process-local identifier store.
//!
//! Used with `STORAGE_BACKEND=memory` for local development and by the
//! handler tests. Data is lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Inner {
    links: HashMap<String, ShortLink>,
    next_id: i64,
}

/// In-memory repository. Every operation runs under a single lock, so
/// insert-if-absent and click increments are atomic.
#[derive(Debug, Default)]
pub struct InMemoryShortLinkRepository {
    inner: Mutex<Inner>,
}

impl InMemoryShortLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn exists(&self, short_id: &str) -> Result<bool, AppError> {
        Ok(self.lock().links.contains_key(short_id))
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.lock().links.get(short_id).cloned())
    }

    async fn insert_if_absent(
        &self,
        new_link: NewShortLink,
    ) -> Result<Option<ShortLink>, AppError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;

        match inner.links.entry(new_link.short_id) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let link = ShortLink::new(
                    id,
                    slot.key().clone(),
                    new_link.original_url,
                    0,
                    Utc::now(),
                );
                slot.insert(link.clone());
                Ok(Some(link))
            }
        }
    }

    async fn increment_clicks(&self, short_id: &str) -> Result<Option<ShortLink>, AppError> {
        let mut inner = self.lock();

        Ok(inner.links.get_mut(short_id).map(|link| {
            link.clicks += 1;
            link.clone()
        }))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock().links.len() as i64)
    }

    async fn top_by_clicks(&self, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let mut links: Vec<ShortLink> = self.lock().links.values().cloned().collect();
        links.sort_by(|a, b| {
            b.clicks
                .cmp(&a.clicks)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        links.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(links)
    }
}
