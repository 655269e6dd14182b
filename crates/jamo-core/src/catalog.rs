//! Character catalog types.
//!
//! The catalog is an ordered, read-only sequence of learnable Hangul
//! characters. The engine never mutates it; it only derives candidate id
//! lists from it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterCategory {
    Consonant,
    Vowel,
}

/// One learnable Hangul character with its display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Unique catalog key.
    pub id: String,
    pub korean: String,
    pub english: String,
    pub romanization: String,
    pub category: CharacterCategory,
    /// 1-based usage-frequency rank within the catalog.
    pub frequency_rank: u32,
}

/// Ordered character catalog. Order is significant: the due filter and
/// the session sequence preserve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub characters: Vec<Character>,
}

impl Catalog {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Candidate id list in catalog order.
    pub fn ids(&self) -> Vec<String> {
        self.characters.iter().map(|c| c.id.clone()).collect()
    }

    /// The built-in basic jamo deck: 14 base consonants and 10 base vowels.
    pub fn basic_jamo() -> Self {
        fn ch(
            id: &str,
            korean: &str,
            english: &str,
            romanization: &str,
            category: CharacterCategory,
            frequency_rank: u32,
        ) -> Character {
            Character {
                id: id.into(),
                korean: korean.into(),
                english: english.into(),
                romanization: romanization.into(),
                category,
                frequency_rank,
            }
        }

        use CharacterCategory::{Consonant, Vowel};
        Self {
            characters: vec![
                ch("giyeok", "ㄱ", "g/k sound", "g", Consonant, 1),
                ch("nieun", "ㄴ", "n sound", "n", Consonant, 2),
                ch("digeut", "ㄷ", "d/t sound", "d", Consonant, 3),
                ch("rieul", "ㄹ", "r/l sound", "r", Consonant, 4),
                ch("mieum", "ㅁ", "m sound", "m", Consonant, 5),
                ch("bieup", "ㅂ", "b/p sound", "b", Consonant, 6),
                ch("siot", "ㅅ", "s sound", "s", Consonant, 7),
                ch("ieung", "ㅇ", "silent / ng sound", "ng", Consonant, 8),
                ch("jieut", "ㅈ", "j sound", "j", Consonant, 9),
                ch("chieut", "ㅊ", "ch sound", "ch", Consonant, 10),
                ch("kieuk", "ㅋ", "k sound (aspirated)", "k", Consonant, 11),
                ch("tieut", "ㅌ", "t sound (aspirated)", "t", Consonant, 12),
                ch("pieup", "ㅍ", "p sound (aspirated)", "p", Consonant, 13),
                ch("hieut", "ㅎ", "h sound", "h", Consonant, 14),
                ch("a", "ㅏ", "a as in father", "a", Vowel, 15),
                ch("ya", "ㅑ", "ya as in yard", "ya", Vowel, 16),
                ch("eo", "ㅓ", "eo as in son", "eo", Vowel, 17),
                ch("yeo", "ㅕ", "yeo as in yonder", "yeo", Vowel, 18),
                ch("o", "ㅗ", "o as in note", "o", Vowel, 19),
                ch("yo", "ㅛ", "yo as in yoga", "yo", Vowel, 20),
                ch("u", "ㅜ", "u as in moon", "u", Vowel, 21),
                ch("yu", "ㅠ", "yu as in you", "yu", Vowel, 22),
                ch("eu", "ㅡ", "eu as in taken", "eu", Vowel, 23),
                ch("i", "ㅣ", "i as in machine", "i", Vowel, 24),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_jamo_has_unique_ids() {
        let catalog = Catalog::basic_jamo();
        let mut ids = catalog.ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn ids_preserve_catalog_order() {
        let catalog = Catalog::basic_jamo();
        let ids = catalog.ids();
        assert_eq!(ids[0], "giyeok");
        assert_eq!(ids[23], "i");
    }
}
