//! Progress persistence.
//!
//! Three logical collections back the engine: per-character progress,
//! the settings singleton, and the session-stats singleton. The engine
//! only depends on the [`ProgressStore`] contract; [`SqliteStore`] is
//! the on-disk implementation and [`MemoryStore`] the ephemeral one.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::progress::{CharacterProgress, Settings};
use crate::stats::SessionStats;

/// Asynchronous key-value persistence contract.
///
/// Singleton reads (`settings`, `stats`) have get-or-create semantics:
/// on first access the default record is persisted and returned, and
/// implementations must guard that path so concurrent first reads
/// converge on a single written default. `save_review` is the atomic
/// two-record write used by `rate()`: either both records land or
/// neither does.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn load_progress(
        &self,
        character_id: &str,
    ) -> Result<Option<CharacterProgress>, StorageError>;

    async fn load_all_progress(&self) -> Result<Vec<CharacterProgress>, StorageError>;

    /// Upsert one progress record by `character_id`.
    async fn save_progress(&self, progress: &CharacterProgress) -> Result<(), StorageError>;

    /// Load the settings singleton, persisting defaults on first access.
    async fn settings(&self) -> Result<Settings, StorageError>;

    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError>;

    /// Load the stats singleton, persisting defaults on first access.
    async fn stats(&self) -> Result<SessionStats, StorageError>;

    async fn save_stats(&self, stats: &SessionStats) -> Result<(), StorageError>;

    /// Persist the outcome of one rating: the updated progress record
    /// and the updated stats, both-or-neither.
    async fn save_review(
        &self,
        progress: &CharacterProgress,
        stats: &SessionStats,
    ) -> Result<(), StorageError>;
}

/// Returns `~/.config/jamo[-dev]/` based on JAMO_ENV.
///
/// Set JAMO_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("JAMO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("jamo-dev")
    } else {
        base_dir.join("jamo")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
