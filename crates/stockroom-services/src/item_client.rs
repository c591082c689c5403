//! Async access to the blocking item store.
//!
//! `ItemClient` owns the backend behind a mutex and runs every call on the
//! blocking thread pool, so HTTP handlers never stall the runtime on SQLite.

use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::item::{Item, ItemUpdate, NewItem};
use crate::item_backend::{ItemBackend, ItemBackendError, ItemBackendResult};
use crate::stats::{CategoryStat, DailyCount, StatsEngine, Totals};

/// Cloneable async handle over an item backend.
#[derive(Clone)]
pub struct ItemClient {
    backend: Arc<Mutex<Box<dyn ItemBackend>>>,
}

impl ItemClient {
    pub fn new<B: ItemBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(Mutex::new(Box::new(backend))),
        }
    }

    /// Run `f` against the backend on the blocking pool.
    async fn with_backend<T, F>(&self, f: F) -> ItemBackendResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ItemBackend) -> ItemBackendResult<T> + Send + 'static,
    {
        let backend = self.backend.clone();
        tokio::task::spawn_blocking(move || {
            let guard = backend.lock();
            f(&**guard)
        })
        .await
        .map_err(|e| ItemBackendError::Other(e.into()))?
    }

    /// List all items, newest first.
    pub async fn list(&self) -> ItemBackendResult<Vec<Item>> {
        self.with_backend(|b| b.list()).await
    }

    /// Get an item by ID.
    ///
    /// # Errors
    /// Returns `ItemBackendError::NotFound` if the item doesn't exist.
    pub async fn get(&self, id: i64) -> ItemBackendResult<Item> {
        self.with_backend(move |b| b.get(id)?.ok_or(ItemBackendError::NotFound(id)))
            .await
    }

    pub async fn create(&self, item: NewItem) -> ItemBackendResult<Item> {
        self.with_backend(move |b| b.create(item)).await
    }

    pub async fn update(&self, id: i64, update: ItemUpdate) -> ItemBackendResult<Item> {
        self.with_backend(move |b| b.update(id, update)).await
    }

    pub async fn delete(&self, id: i64) -> ItemBackendResult<()> {
        self.with_backend(move |b| b.delete(id)).await
    }

    pub async fn category_breakdown(&self) -> ItemBackendResult<Vec<CategoryStat>> {
        self.with_backend(|b| StatsEngine::new(b).category_breakdown())
            .await
    }

    pub async fn recent_items(
        &self,
        window_days: NonZeroU32,
        now: DateTime<Utc>,
    ) -> ItemBackendResult<Vec<Item>> {
        self.with_backend(move |b| StatsEngine::new(b).recent_items(window_days, now))
            .await
    }

    pub async fn daily_counts(
        &self,
        window_days: NonZeroU32,
        now: DateTime<Utc>,
    ) -> ItemBackendResult<Vec<DailyCount>> {
        self.with_backend(move |b| StatsEngine::new(b).daily_counts(window_days, now))
            .await
    }

    pub async fn totals(&self) -> ItemBackendResult<Totals> {
        self.with_backend(|b| StatsEngine::new(b).totals()).await
    }

    /// Everything the dashboard needs, read under a single lock.
    pub async fn dashboard_stats(
        &self,
        window_days: NonZeroU32,
        now: DateTime<Utc>,
    ) -> ItemBackendResult<(Vec<CategoryStat>, Vec<DailyCount>, Totals)> {
        self.with_backend(move |b| {
            let engine = StatsEngine::new(b);
            Ok((
                engine.category_breakdown()?,
                engine.daily_counts(window_days, now)?,
                engine.totals()?,
            ))
        })
        .await
    }
}
