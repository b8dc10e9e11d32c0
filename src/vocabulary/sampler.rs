//! Session sampling
//!
//! Builds the working set for a study session: mostly new or
//! unmastered words, with a small slice of mastered ones for light
//! refreshing. Within each slice the draw is a plain uniform shuffle.
//! Recency and difficulty deliberately do not weight the draw, due
//! items are surfaced separately by the store.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::models::VocabularyItem;

/// Sampling defaults, persisted as part of the trainer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerConfig {
    /// Default working-set size per session
    #[serde(default = "default_session_size")]
    pub session_size: usize,
    /// Share of the working set reserved for mastered items
    #[serde(default = "default_mastered_fraction")]
    pub mastered_fraction: f64,
}

fn default_session_size() -> usize {
    25
}

fn default_mastered_fraction() -> f64 {
    0.05
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            session_size: default_session_size(),
            mastered_fraction: default_mastered_fraction(),
        }
    }
}

/// Draw a working set of at most `n` items.
///
/// The mastered partition contributes `floor(n * mastered_fraction)`
/// items, the unmastered partition fills the rest. A partition shorter
/// than its quota is taken whole, so the result may be shorter than
/// `n`. The combined set is shuffled again so mastered items are not
/// clumped at either end.
pub fn sample(
    items: Vec<VocabularyItem>,
    n: usize,
    mastered_fraction: f64,
    rng: &mut impl Rng,
) -> Vec<VocabularyItem> {
    if n == 0 || items.is_empty() {
        return Vec::new();
    }

    let fraction = mastered_fraction.clamp(0.0, 1.0);
    let mastered_take = (n as f64 * fraction).floor() as usize;
    let unmastered_take = n - mastered_take;

    let (mut mastered, mut unmastered): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|item| item.mastered);

    mastered.shuffle(rng);
    unmastered.shuffle(rng);

    mastered.truncate(mastered_take);
    unmastered.truncate(unmastered_take);

    let mut working_set = unmastered;
    working_set.append(&mut mastered);
    working_set.shuffle(rng);

    working_set
}
