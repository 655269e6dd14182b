//! Session statistics aggregation.
//!
//! `record_rating` is pure: it folds one rating event into the running
//! stats and returns the updated value. The caller persists the result.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// All-time review statistics singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_reviews: u64,
    /// Exact arithmetic mean of every rating recorded through
    /// [`record_rating`]; 0.0 until the first review.
    pub average_rating: f64,
    /// Ids whose most recent rating was >= 4. Membership is re-evaluated
    /// on every rating of a character, not accumulated.
    pub mastered_characters: BTreeSet<String>,
    pub last_session_date: DateTime<Utc>,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            total_reviews: 0,
            average_rating: 0.0,
            mastered_characters: BTreeSet::new(),
            last_session_date: Utc::now(),
        }
    }
}

impl SessionStats {
    pub fn mastered_count(&self) -> usize {
        self.mastered_characters.len()
    }
}

/// Fold one rating event into `stats`.
///
/// Updates the running mean incrementally (no recomputation from
/// history) and re-evaluates mastery for `character_id` from this
/// rating alone.
pub fn record_rating(
    stats: &SessionStats,
    character_id: &str,
    rating: u8,
    now: DateTime<Utc>,
) -> SessionStats {
    let total = stats.total_reviews + 1;
    let average =
        (stats.average_rating * stats.total_reviews as f64 + rating as f64) / total as f64;

    let mut mastered = stats.mastered_characters.clone();
    if rating >= 4 {
        mastered.insert(character_id.to_string());
    } else {
        mastered.remove(character_id);
    }

    SessionStats {
        total_reviews: total,
        average_rating: average,
        mastered_characters: mastered,
        last_session_date: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incremental_mean() {
        let now = Utc::now();
        let stats = SessionStats::default();
        let stats = record_rating(&stats, "giyeok", 3, now);
        let stats = record_rating(&stats, "nieun", 5, now);
        assert_eq!(stats.total_reviews, 2);
        assert!((stats.average_rating - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mastery_follows_last_rating() {
        let now = Utc::now();
        let stats = SessionStats::default();
        let stats = record_rating(&stats, "giyeok", 5, now);
        assert!(stats.mastered_characters.contains("giyeok"));

        let stats = record_rating(&stats, "giyeok", 2, now);
        assert!(!stats.mastered_characters.contains("giyeok"));
        assert_eq!(stats.total_reviews, 2);
    }

    #[test]
    fn rating_below_four_never_masters() {
        let now = Utc::now();
        let stats = record_rating(&SessionStats::default(), "nieun", 3, now);
        assert!(stats.mastered_characters.is_empty());
    }

    #[test]
    fn last_session_date_stamped() {
        let now = Utc::now();
        let stats = record_rating(&SessionStats::default(), "a", 4, now);
        assert_eq!(stats.last_session_date, now);
    }
}
