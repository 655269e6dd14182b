//! Persisted per-character review progress and user settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review progress for one catalog character.
///
/// Created on the first rating of a character and mutated in place
/// afterwards; never deleted. `next_review_date` is always at or after
/// `last_reviewed`, and `review_count` grows by exactly one per rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProgress {
    pub character_id: String,
    /// Most recent rating on the 1..=5 scale.
    pub rating: u8,
    pub last_reviewed: DateTime<Utc>,
    pub next_review_date: DateTime<Utc>,
    pub review_count: u32,
}

/// User settings singleton.
///
/// Created lazily with defaults on first read; mutated only by an
/// explicit save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub show_guide_lines: bool,
    pub stroke_width: u32,
    pub auto_flip: bool,
    pub auto_flip_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_guide_lines: true,
            stroke_width: 3,
            auto_flip: false,
            auto_flip_delay_ms: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert!(settings.show_guide_lines);
        assert_eq!(settings.stroke_width, 3);
        assert!(!settings.auto_flip);
        assert_eq!(settings.auto_flip_delay_ms, 3000);
    }

    #[test]
    fn progress_round_trips_through_json() {
        let progress = CharacterProgress {
            character_id: "giyeok".into(),
            rating: 4,
            last_reviewed: Utc::now(),
            next_review_date: Utc::now(),
            review_count: 2,
        };
        let json = serde_json::to_string(&progress).unwrap();
        let back: CharacterProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}
