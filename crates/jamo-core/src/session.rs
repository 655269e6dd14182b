//! Review session state machine.
//!
//! A session is built once from the catalog and the progress store, and
//! lives for the process only: the card sequence is fixed at build time
//! and navigation state is never persisted.
//!
//! ## State transitions
//!
//! ```text
//! start() -> Active          (due subsequence, or full catalog fallback)
//!         -> Empty           (catalog had no characters)
//!
//! Active: flip()      Front <-> Back
//!         rate(r)     Back + r in 1..=5 -> persist, then advance
//!         skip()      advance without history
//!         previous()  pop history, or no-op
//! ```
//!
//! All transitions run on the caller's single logical thread; `rate`
//! suspends on persistence, and `&mut self` keeps a second transition
//! from interleaving with an in-flight one.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Character};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::{Event, EventListener};
use crate::progress::{CharacterProgress, Settings};
use crate::scheduler;
use crate::stats::{self, SessionStats};
use crate::store::ProgressStore;

/// Most recent indices kept for `previous()`.
const HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Nonempty card sequence with a valid current index. The sole
    /// steady state: the full-catalog fallback means a session only
    /// misses it when the catalog itself is empty.
    Active,
    /// Degenerate terminal state for an empty catalog. No valid index;
    /// navigation is a no-op and `rate` is rejected.
    Empty,
}

/// Position summary returned by [`ReviewSession::progress`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionProgress {
    /// 1-based position of the current card.
    pub current_position: usize,
    pub total: usize,
    pub mastered_count: usize,
}

/// In-session navigation engine over a fixed card sequence.
pub struct ReviewSession<S: ProgressStore> {
    store: S,
    characters: Vec<Character>,
    progress_index: HashMap<String, CharacterProgress>,
    stats: SessionStats,
    settings: Settings,
    state: SessionState,
    current_index: usize,
    is_flipped: bool,
    history: Vec<usize>,
    skipped: HashSet<String>,
    listeners: Vec<EventListener>,
    due_count: usize,
}

impl<S: ProgressStore> ReviewSession<S> {
    /// Build a session from the catalog and the persisted progress.
    ///
    /// The sequence is the due subsequence of the catalog, in catalog
    /// order. When nothing is due the full catalog is used instead, so
    /// the session starts `Empty` only for an empty catalog.
    pub async fn start(catalog: &Catalog, store: S) -> Result<Self> {
        let settings = store.settings().await?;
        let stats = store.stats().await?;

        if catalog.is_empty() {
            return Ok(Self {
                store,
                characters: Vec::new(),
                progress_index: HashMap::new(),
                stats,
                settings,
                state: SessionState::Empty,
                current_index: 0,
                is_flipped: false,
                history: Vec::new(),
                skipped: HashSet::new(),
                listeners: Vec::new(),
                due_count: 0,
            });
        }

        let progress_index: HashMap<String, CharacterProgress> = store
            .load_all_progress()
            .await?
            .into_iter()
            .map(|p| (p.character_id.clone(), p))
            .collect();

        let due = scheduler::select_due(&catalog.ids(), &progress_index, Utc::now());
        let due_count = due.len();

        let characters: Vec<Character> = if due.is_empty() {
            catalog.characters.clone()
        } else {
            let due_set: HashSet<&str> = due.iter().map(String::as_str).collect();
            catalog
                .characters
                .iter()
                .filter(|c| due_set.contains(c.id.as_str()))
                .cloned()
                .collect()
        };

        Ok(Self {
            store,
            characters,
            progress_index,
            stats,
            settings,
            state: SessionState::Active,
            current_index: 0,
            is_flipped: false,
            history: Vec::new(),
            skipped: HashSet::new(),
            listeners: Vec::new(),
            due_count,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_card(&self) -> Option<&Character> {
        match self.state {
            SessionState::Active => self.characters.get(self.current_index),
            SessionState::Empty => None,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Number of ids the due filter matched at build time (before any
    /// full-catalog fallback).
    pub fn due_count(&self) -> usize {
        self.due_count
    }

    /// Ids skipped during this session. Cleared when the session ends;
    /// never persisted.
    pub fn skipped_ids(&self) -> &HashSet<String> {
        &self.skipped
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            current_position: match self.state {
                SessionState::Active => self.current_index + 1,
                SessionState::Empty => 0,
            },
            total: self.characters.len(),
            mastered_count: self.stats.mastered_count(),
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Auto-flip hint from the settings singleton.
    pub fn auto_flip(&self) -> bool {
        self.settings.auto_flip
    }

    pub fn auto_flip_delay_ms(&self) -> u64 {
        self.settings.auto_flip_delay_ms
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            current_index: self.current_index,
            total: self.characters.len(),
            is_flipped: self.is_flipped,
            mastered_count: self.stats.mastered_count(),
            at: Utc::now(),
        }
    }

    /// Register an observer for session events.
    ///
    /// Listeners live as long as the session; there is no unsubscribe,
    /// and no ambient process-wide broadcaster.
    pub fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Toggle the current card between front and back.
    pub fn flip(&mut self) -> Option<Event> {
        let card = self.current_card()?;
        let character_id = card.id.clone();
        self.is_flipped = !self.is_flipped;
        let event = Event::CardFlipped {
            character_id,
            flipped: self.is_flipped,
            at: Utc::now(),
        };
        self.notify(&event);
        Some(event)
    }

    /// Rate the current card and advance.
    ///
    /// Preconditions: the card is flipped and `rating` is in 1..=5;
    /// violations are rejected before anything changes. The progress and
    /// stats records are persisted atomically first; navigation advances
    /// only once the write has succeeded, so a storage failure leaves
    /// the session exactly where it was.
    pub async fn rate(&mut self, rating: u8) -> Result<Event> {
        let card = match self.current_card() {
            Some(card) => card,
            None => return Err(CoreError::EmptyCatalog),
        };
        let character_id = card.id.clone();

        let now = Utc::now();
        let next_review_date = scheduler::next_review_date(rating, now)?;
        if !self.is_flipped {
            return Err(ValidationError::NotFlipped.into());
        }

        let updated_progress = match self.progress_index.get(&character_id) {
            Some(existing) => CharacterProgress {
                character_id: character_id.clone(),
                rating,
                last_reviewed: now,
                next_review_date,
                review_count: existing.review_count + 1,
            },
            None => CharacterProgress {
                character_id: character_id.clone(),
                rating,
                last_reviewed: now,
                next_review_date,
                review_count: 1,
            },
        };
        let updated_stats = stats::record_rating(&self.stats, &character_id, rating, now);

        self.store
            .save_review(&updated_progress, &updated_stats)
            .await?;

        // Persisted; now commit the in-memory transition.
        self.progress_index
            .insert(character_id.clone(), updated_progress);
        self.stats = updated_stats;
        self.push_history(self.current_index);
        self.advance();

        let event = Event::CardRated {
            character_id,
            rating,
            next_review_date,
            at: now,
        };
        self.notify(&event);
        Ok(event)
    }

    /// Advance without rating. The skipped position is not pushed onto
    /// the history stack, so `previous()` cannot reach it.
    pub fn skip(&mut self) -> Option<Event> {
        let card = self.current_card()?;
        let character_id = card.id.clone();
        self.skipped.insert(character_id.clone());
        self.advance();
        let event = Event::CardSkipped {
            character_id,
            at: Utc::now(),
        };
        self.notify(&event);
        Some(event)
    }

    /// Return to the most recently rated position, if any.
    pub fn previous(&mut self) -> Option<Event> {
        let to_index = self.history.pop()?;
        self.current_index = to_index;
        self.is_flipped = false;
        let event = Event::WentBack {
            to_index,
            at: Utc::now(),
        };
        self.notify(&event);
        Some(event)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) {
        // The session cycles rather than terminates.
        self.current_index = (self.current_index + 1) % self.characters.len();
        self.is_flipped = false;
    }

    fn push_history(&mut self, index: usize) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(index);
    }

    fn notify(&self, event: &Event) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}
