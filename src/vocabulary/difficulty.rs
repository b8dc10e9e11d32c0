//! CEFR tier inference for vocabulary items
//!
//! The tier is a structural estimate from the surface form of the
//! German word: length of the longest component plus a handful of
//! morphological markers. It only has to be deterministic, it is not
//! a linguistic judgement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Six-level proficiency scale used for both item difficulty and the
/// aggregate learner level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CefrTier {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Default for CefrTier {
    fn default() -> Self {
        Self::A1
    }
}

impl CefrTier {
    /// Next tier up, saturating at C2
    pub fn bump(self) -> Self {
        match self {
            Self::A1 => Self::A2,
            Self::A2 => Self::B1,
            Self::B1 => Self::B2,
            Self::B2 => Self::C1,
            Self::C1 => Self::C2,
            Self::C2 => Self::C2,
        }
    }
}

impl fmt::Display for CefrTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        };
        write!(f, "{}", s)
    }
}

/// Abstract-noun suffixes that tend to show up in later coursework
const ABSTRACT_SUFFIXES: [&str; 8] = [
    "ung", "keit", "heit", "schaft", "tum", "nis", "ismus", "ität",
];

/// Infer a CEFR tier from the surface form of a word or short phrase.
///
/// Phrases are judged by their longest component so articles in
/// entries like "das Haus" do not drag the estimate down.
pub fn infer_tier(word: &str) -> CefrTier {
    let longest = word
        .split_whitespace()
        .map(|part| part.chars().count())
        .max()
        .unwrap_or(0);

    let base = match longest {
        0..=4 => CefrTier::A1,
        5..=6 => CefrTier::A2,
        7..=9 => CefrTier::B1,
        10..=12 => CefrTier::B2,
        13..=16 => CefrTier::C1,
        _ => CefrTier::C2,
    };

    let lower = word.to_lowercase();
    if ABSTRACT_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        base.bump()
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_words_are_a1() {
        assert_eq!(infer_tier("Haus"), CefrTier::A1);
        assert_eq!(infer_tier("gut"), CefrTier::A1);
    }

    #[test]
    fn test_article_does_not_count() {
        // Judged by "Haus", not the phrase length
        assert_eq!(infer_tier("das Haus"), CefrTier::A1);
    }

    #[test]
    fn test_length_tiers() {
        assert_eq!(infer_tier("Fenster"), CefrTier::B1);
        assert_eq!(infer_tier("Entschuldigung"), CefrTier::C2); // C1 by length, bumped by -ung
        assert_eq!(infer_tier("Geschwindigkeitsbegrenzung"), CefrTier::C2);
    }

    #[test]
    fn test_abstract_suffix_bumps() {
        // "Meinung" is 7 chars (B1 by length), bumped by -ung
        assert_eq!(infer_tier("Meinung"), CefrTier::B2);
        assert_eq!(infer_tier("Freiheit"), CefrTier::B2);
    }

    #[test]
    fn test_deterministic() {
        for word in ["Zug", "Bahnhof", "Wissenschaft", "unverständlich"] {
            assert_eq!(infer_tier(word), infer_tier(word));
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(infer_tier(""), CefrTier::A1);
    }
}
