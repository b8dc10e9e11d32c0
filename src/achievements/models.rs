use serde::{Deserialize, Serialize};

/// Counter an achievement is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    WordsMastered,
    StreakDays,
    GrammarTopics,
    StudyHours,
}

/// Static catalog entry. The catalog is fixed at compile time, only
/// per-learner unlock state lives in the profile.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    /// Counter value at which the achievement unlocks
    pub target: u32,
}

/// Snapshot of the aggregate counters achievements are evaluated
/// against
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateSnapshot {
    pub mastered_count: u32,
    pub current_streak: u32,
    pub grammar_topics: u32,
    pub study_hours: u32,
}

impl AggregateSnapshot {
    pub fn value_of(&self, metric: Metric) -> u32 {
        match metric {
            Metric::WordsMastered => self.mastered_count,
            Metric::StreakDays => self.current_streak,
            Metric::GrammarTopics => self.grammar_topics,
            Metric::StudyHours => self.study_hours,
        }
    }
}

/// Catalog entry joined with the learner's unlock state, for progress
/// bars
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Current counter value, clamped to the target
    pub progress: u32,
    pub max_progress: u32,
}
