//! In-memory progress store.
//!
//! Backs ephemeral review sessions and the engine's own tests. Same
//! contract as the SQLite store: the interior mutex serializes access,
//! so singleton get-or-create is single-flight and `save_review` applies
//! both records or neither.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::progress::{CharacterProgress, Settings};
use crate::stats::SessionStats;

use super::ProgressStore;

#[derive(Default)]
struct Inner {
    progress: HashMap<String, CharacterProgress>,
    settings: Option<Settings>,
    stats: Option<SessionStats>,
}

/// HashMap-backed store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a progress record (test setup).
    pub async fn seed_progress(&self, progress: CharacterProgress) {
        let mut inner = self.inner.lock().await;
        inner
            .progress
            .insert(progress.character_id.clone(), progress);
    }
}

#[async_trait::async_trait]
impl ProgressStore for MemoryStore {
    async fn load_progress(
        &self,
        character_id: &str,
    ) -> Result<Option<CharacterProgress>, StorageError> {
        let inner = self.inner.lock().await;
        Ok(inner.progress.get(character_id).cloned())
    }

    async fn load_all_progress(&self) -> Result<Vec<CharacterProgress>, StorageError> {
        let inner = self.inner.lock().await;
        Ok(inner.progress.values().cloned().collect())
    }

    async fn save_progress(&self, progress: &CharacterProgress) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        inner
            .progress
            .insert(progress.character_id.clone(), progress.clone());
        Ok(())
    }

    async fn settings(&self) -> Result<Settings, StorageError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.settings.get_or_insert_with(Settings::default).clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        inner.settings = Some(settings.clone());
        Ok(())
    }

    async fn stats(&self) -> Result<SessionStats, StorageError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.stats.get_or_insert_with(SessionStats::default).clone())
    }

    async fn save_stats(&self, stats: &SessionStats) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        inner.stats = Some(stats.clone());
        Ok(())
    }

    async fn save_review(
        &self,
        progress: &CharacterProgress,
        stats: &SessionStats,
    ) -> Result<(), StorageError> {
        // One lock scope covers both inserts: both-or-neither.
        let mut inner = self.inner.lock().await;
        inner
            .progress
            .insert(progress.character_id.clone(), progress.clone());
        inner.stats = Some(stats.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    #[tokio::test]
    async fn get_or_create_converges_across_concurrent_first_reads() {
        let store = Arc::new(MemoryStore::new());

        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.stats().await.unwrap() })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.stats().await.unwrap() })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!(a.total_reviews, b.total_reviews);
        assert_eq!(a.mastered_characters, b.mastered_characters);
    }

    #[tokio::test]
    async fn save_review_updates_both_collections() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let progress = CharacterProgress {
            character_id: "siot".into(),
            rating: 5,
            last_reviewed: now,
            next_review_date: now + Duration::days(14),
            review_count: 1,
        };
        let stats = crate::stats::record_rating(&SessionStats::default(), "siot", 5, now);

        store.save_review(&progress, &stats).await.unwrap();

        assert_eq!(store.load_all_progress().await.unwrap().len(), 1);
        assert_eq!(store.stats().await.unwrap().total_reviews, 1);
    }
}
