//! Review interval scheduling
//!
//! A deliberately simple spaced-repetition rule: a correct review
//! doubles the interval up to a ceiling, an incorrect one halves it
//! down to a floor. The factor and bounds were tuned by hand in the
//! product, so they live in configuration rather than in code.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::models::VocabularyItem;

/// Scheduling parameters, persisted as part of the trainer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Multiplier applied on a correct review (and divisor on an
    /// incorrect one)
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
    /// Minimum interval in days
    #[serde(default = "default_interval_floor")]
    pub interval_floor_days: u32,
    /// Maximum interval in days
    #[serde(default = "default_interval_ceiling")]
    pub interval_ceiling_days: u32,
}

fn default_growth_factor() -> f64 {
    2.0
}

fn default_interval_floor() -> u32 {
    1
}

fn default_interval_ceiling() -> u32 {
    90
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            growth_factor: default_growth_factor(),
            interval_floor_days: default_interval_floor(),
            interval_ceiling_days: default_interval_ceiling(),
        }
    }
}

impl SchedulerConfig {
    /// Clamp an interval into the configured bounds. Applied on every
    /// transition so the invariant holds regardless of call order or
    /// of what an imported document claims.
    pub fn clamp_interval(&self, days: u32) -> u32 {
        days.clamp(self.interval_floor_days, self.interval_ceiling_days)
    }
}

/// Result of applying one review outcome to an item
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub interval_days: u32,
    pub next_review: DateTime<Utc>,
    pub mastered: bool,
    pub mastered_date: Option<DateTime<Utc>>,
}

/// Calculate the next review state for an item.
///
/// Correct: the item counts as mastered (the caller decides what
/// "correct" means, the store does not judge sufficiency) and the
/// interval grows. Incorrect: the interval shrinks and mastery is left
/// exactly as it was. There is no implicit demotion path.
pub fn apply_review(
    item: &VocabularyItem,
    was_correct: bool,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> ReviewOutcome {
    let current = config.clamp_interval(item.review_interval_days);

    let (interval_days, mastered, mastered_date) = if was_correct {
        let grown = (current as f64 * config.growth_factor).round() as u32;
        let mastered_date = item.mastered_date.or(Some(now));
        (config.clamp_interval(grown), true, mastered_date)
    } else {
        let shrunk = (current as f64 / config.growth_factor).floor() as u32;
        (config.clamp_interval(shrunk), item.mastered, item.mastered_date)
    };

    ReviewOutcome {
        interval_days,
        next_review: now + Duration::days(interval_days as i64),
        mastered,
        mastered_date,
    }
}
