//! Data models for the vocabulary store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::difficulty::{infer_tier, CefrTier};

/// Where a vocabulary item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    /// Shipped seed corpus
    Seed,
    /// Produced by the text-generation collaborator
    Generated,
    /// Extracted from learner material (reading texts, chat practice)
    Extracted,
}

impl Default for Origin {
    fn default() -> Self {
        Self::Seed
    }
}

/// Coarse position of an item in the learning process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewStatus {
    /// Never reviewed
    New,
    /// Reviewed at least once, not yet mastered
    Learning,
    /// Marked mastered
    Mastered,
}

/// Input for creating a new vocabulary item. Review state is assigned
/// by the store, never by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub example: String,
}

impl ItemDraft {
    pub fn new(
        word: impl Into<String>,
        translation: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            example: example.into(),
        }
    }
}

/// A learnable unit: a German term with translation, example sentence,
/// and per-item review scheduling state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    /// Natural-language key, unique within its owner scope
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub mastered: bool,
    /// Set once, on the first transition to mastered. Survives a later
    /// explicit demotion so history is never erased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastered_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub times_reviewed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Days until the next review, always within the configured bounds
    #[serde(default = "default_interval_days")]
    pub review_interval_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default)]
    pub difficulty: CefrTier,
}

fn default_interval_days() -> u32 {
    1
}

impl VocabularyItem {
    pub fn new(draft: ItemDraft, origin: Origin) -> Self {
        let difficulty = infer_tier(&draft.word);
        Self {
            word: draft.word,
            translation: draft.translation,
            example: draft.example,
            origin,
            created_at: Utc::now(),
            mastered: false,
            mastered_date: None,
            times_reviewed: 0,
            last_reviewed: None,
            review_interval_days: default_interval_days(),
            next_review: None,
            difficulty,
        }
    }

    pub fn status(&self) -> ReviewStatus {
        if self.mastered {
            ReviewStatus::Mastered
        } else if self.times_reviewed == 0 {
            ReviewStatus::New
        } else {
            ReviewStatus::Learning
        }
    }

    /// Check if the item is due for review. Items never reviewed are
    /// always due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review {
            Some(due) => due <= now,
            None => true,
        }
    }

    /// Key used for duplicate detection and lookup: trimmed,
    /// case-insensitive.
    pub fn key(&self) -> String {
        normalize_key(&self.word)
    }
}

/// Normalize a word into its lookup key
pub fn normalize_key(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let item = VocabularyItem::new(
            ItemDraft::new("Haus", "house", "Das Haus ist groß."),
            Origin::Seed,
        );
        assert!(!item.mastered);
        assert_eq!(item.times_reviewed, 0);
        assert_eq!(item.review_interval_days, 1);
        assert_eq!(item.status(), ReviewStatus::New);
        assert!(item.is_due(Utc::now()));
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(normalize_key("  Haus "), "haus");
        assert_eq!(normalize_key("GROSS"), "gross");
        let item = VocabularyItem::new(ItemDraft::new("Straße", "street", ""), Origin::Seed);
        assert_eq!(item.key(), "straße");
    }
}
