//! Review session events.
//!
//! Every session state change produces an [`Event`]. Consumers either
//! inspect the event returned by the triggering command or register a
//! listener on the session; there is no process-wide broadcaster.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionState;

/// Listener callback registered on a session via
/// [`crate::session::ReviewSession::subscribe`].
pub type EventListener = Box<dyn Fn(&Event) + Send>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        total: usize,
        due_count: usize,
        at: DateTime<Utc>,
    },
    CardFlipped {
        character_id: String,
        flipped: bool,
        at: DateTime<Utc>,
    },
    CardRated {
        character_id: String,
        rating: u8,
        next_review_date: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    CardSkipped {
        character_id: String,
        at: DateTime<Utc>,
    },
    WentBack {
        to_index: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        current_index: usize,
        total: usize,
        is_flipped: bool,
        mastered_count: usize,
        at: DateTime<Utc>,
    },
}
