//! Achievement evaluation
//!
//! Unlocking is monotonic: an id appended to the learner's unlocked
//! set stays there no matter how the aggregates move afterwards.
//! Evaluation itself is deterministic and has no side effect beyond
//! that single append.

use chrono::{DateTime, Utc};

use super::models::{AchievementDef, AchievementProgress, AggregateSnapshot, Metric};
use crate::progress::{LearnerProfile, UnlockedAchievement};

/// The fixed achievement catalog
pub static CATALOG: [AchievementDef; 8] = [
    AchievementDef {
        id: "first-word",
        name: "Erstes Wort",
        description: "Master your first word",
        metric: Metric::WordsMastered,
        target: 1,
    },
    AchievementDef {
        id: "words-50",
        name: "Wortsammler",
        description: "Master 50 words",
        metric: Metric::WordsMastered,
        target: 50,
    },
    AchievementDef {
        id: "words-150",
        name: "Wortschatzkiste",
        description: "Master 150 words",
        metric: Metric::WordsMastered,
        target: 150,
    },
    AchievementDef {
        id: "words-500",
        name: "Wörterbuch",
        description: "Master 500 words",
        metric: Metric::WordsMastered,
        target: 500,
    },
    AchievementDef {
        id: "streak-7",
        name: "Eine Woche dran",
        description: "Study seven days in a row",
        metric: Metric::StreakDays,
        target: 7,
    },
    AchievementDef {
        id: "streak-30",
        name: "Eisern",
        description: "Study thirty days in a row",
        metric: Metric::StreakDays,
        target: 30,
    },
    AchievementDef {
        id: "grammar-10",
        name: "Grammatik-Fuchs",
        description: "Review ten grammar topics",
        metric: Metric::GrammarTopics,
        target: 10,
    },
    AchievementDef {
        id: "hours-10",
        name: "Zehn Stunden",
        description: "Study for ten hours in total",
        metric: Metric::StudyHours,
        target: 10,
    },
];

/// Evaluate the catalog against a snapshot and append anything newly
/// earned to the profile. Returns only the new unlocks; achievements
/// already in the unlocked set are never returned again and never
/// removed.
pub fn evaluate(
    snapshot: &AggregateSnapshot,
    profile: &mut LearnerProfile,
    now: DateTime<Utc>,
) -> Vec<&'static AchievementDef> {
    let mut newly_unlocked = Vec::new();

    for def in CATALOG.iter() {
        if profile.has_achievement(def.id) {
            continue;
        }
        if snapshot.value_of(def.metric) >= def.target {
            profile.unlocked_achievements.push(UnlockedAchievement {
                id: def.id.to_string(),
                unlocked_at: now,
            });
            log::info!("achievement unlocked: {}", def.id);
            newly_unlocked.push(def);
        }
    }

    newly_unlocked
}

/// Catalog joined with unlock state and clamped progress, for display
pub fn progress_report(
    snapshot: &AggregateSnapshot,
    profile: &LearnerProfile,
) -> Vec<AchievementProgress> {
    CATALOG
        .iter()
        .map(|def| {
            let unlocked_at = profile
                .unlocked_achievements
                .iter()
                .find(|a| a.id == def.id)
                .map(|a| a.unlocked_at);
            let value = snapshot.value_of(def.metric).min(def.target);
            AchievementProgress {
                id: def.id.to_string(),
                name: def.name.to_string(),
                description: def.description.to_string(),
                unlocked: unlocked_at.is_some(),
                unlocked_at,
                progress: if unlocked_at.is_some() { def.target } else { value },
                max_progress: def.target,
            }
        })
        .collect()
}
