//! Review scheduling.
//!
//! Pure functions only: the next-review offset table and the due-set
//! filter. The interval policy is a fixed rating-indexed lookup, not an
//! adaptive forgetting-curve model.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::error::ValidationError;
use crate::progress::CharacterProgress;

/// Compute the next review time for a rating given at `now`.
///
/// Offsets: 1 -> 6 hours, 2 -> 1 day, 3 -> 3 days, 4 -> 7 days,
/// 5 -> 14 days. Ratings outside 1..=5 are rejected; there is no
/// fallback interval.
pub fn next_review_date(rating: u8, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    let offset = match rating {
        1 => Duration::hours(6),
        2 => Duration::days(1),
        3 => Duration::days(3),
        4 => Duration::days(7),
        5 => Duration::days(14),
        _ => return Err(ValidationError::RatingOutOfRange { rating }),
    };
    Ok(now + offset)
}

/// Filter `candidates` down to the ids due for review at `now`.
///
/// An id is due if it has no progress record, or its next review date
/// has passed. Relative order of `candidates` is preserved. Callers that
/// need a non-empty session must apply the full-catalog fallback
/// themselves when the result is empty.
pub fn select_due(
    candidates: &[String],
    progress_index: &HashMap<String, CharacterProgress>,
    now: DateTime<Utc>,
) -> Vec<String> {
    candidates
        .iter()
        .filter(|id| match progress_index.get(id.as_str()) {
            None => true,
            Some(progress) => progress.next_review_date <= now,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(id: &str, next_review_date: DateTime<Utc>) -> CharacterProgress {
        CharacterProgress {
            character_id: id.into(),
            rating: 3,
            last_reviewed: next_review_date - Duration::days(3),
            next_review_date,
            review_count: 1,
        }
    }

    #[test]
    fn interval_table() {
        let now = Utc::now();
        assert_eq!(next_review_date(1, now).unwrap() - now, Duration::hours(6));
        assert_eq!(next_review_date(2, now).unwrap() - now, Duration::days(1));
        assert_eq!(next_review_date(3, now).unwrap() - now, Duration::days(3));
        assert_eq!(next_review_date(4, now).unwrap() - now, Duration::days(7));
        assert_eq!(next_review_date(5, now).unwrap() - now, Duration::days(14));
    }

    #[test]
    fn out_of_range_ratings_rejected() {
        let now = Utc::now();
        for rating in [0u8, 6, 255] {
            assert!(matches!(
                next_review_date(rating, now),
                Err(ValidationError::RatingOutOfRange { rating: r }) if r == rating
            ));
        }
    }

    #[test]
    fn unreviewed_ids_are_always_due() {
        let now = Utc::now();
        let candidates = vec!["a".to_string(), "b".to_string()];
        let due = select_due(&candidates, &HashMap::new(), now);
        assert_eq!(due, candidates);
    }

    #[test]
    fn due_iff_next_review_date_passed() {
        let now = Utc::now();
        let mut index = HashMap::new();
        index.insert("past".to_string(), progress("past", now - Duration::hours(1)));
        index.insert("exact".to_string(), progress("exact", now));
        index.insert("future".to_string(), progress("future", now + Duration::hours(1)));

        let candidates: Vec<String> = ["past", "exact", "future"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let due = select_due(&candidates, &index, now);
        assert_eq!(due, vec!["past".to_string(), "exact".to_string()]);
    }

    #[test]
    fn candidate_order_preserved() {
        let now = Utc::now();
        let mut index = HashMap::new();
        index.insert("b".to_string(), progress("b", now + Duration::days(1)));

        let candidates: Vec<String> = ["c", "b", "a"].iter().map(|s| s.to_string()).collect();
        let due = select_due(&candidates, &index, now);
        assert_eq!(due, vec!["c".to_string(), "a".to_string()]);
    }
}
