//! Learner profile and derived progress models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::sessions::Skill;
use crate::vocabulary::CefrTier;

/// Per-skill levels on a 0 to 100 scale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevels {
    #[serde(default)]
    pub vocabulary: u32,
    #[serde(default)]
    pub grammar: u32,
    #[serde(default)]
    pub listening: u32,
    #[serde(default)]
    pub speaking: u32,
    #[serde(default)]
    pub reading: u32,
    #[serde(default)]
    pub writing: u32,
}

impl SkillLevels {
    /// Raise a skill level, saturating at 100
    pub fn bump(&mut self, skill: Skill, amount: u32) {
        let slot = match skill {
            Skill::Vocabulary => &mut self.vocabulary,
            Skill::Grammar => &mut self.grammar,
            Skill::Listening => &mut self.listening,
            Skill::Speaking => &mut self.speaking,
            Skill::Reading => &mut self.reading,
            Skill::Writing => &mut self.writing,
        };
        *slot = (*slot + amount).min(100);
    }

    /// Levels in fixed declaration order (the stable tie-break order)
    pub fn as_pairs(&self) -> [(Skill, u32); 6] {
        [
            (Skill::Vocabulary, self.vocabulary),
            (Skill::Grammar, self.grammar),
            (Skill::Listening, self.listening),
            (Skill::Speaking, self.speaking),
            (Skill::Reading, self.reading),
            (Skill::Writing, self.writing),
        ]
    }
}

/// An achievement the learner has earned. Once present, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// Persisted per-learner aggregate. Only the analytics and achievement
/// layers write this record, never the UI directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub total_study_minutes: u64,
    #[serde(default)]
    pub grammar_topics: u32,
    #[serde(default)]
    pub skills: SkillLevels,
    #[serde(default)]
    pub unlocked_achievements: Vec<UnlockedAchievement>,
    pub updated_at: DateTime<Utc>,
}

impl Default for LearnerProfile {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            total_study_minutes: 0,
            grammar_topics: 0,
            skills: SkillLevels::default(),
            unlocked_achievements: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

impl LearnerProfile {
    pub fn has_achievement(&self, id: &str) -> bool {
        self.unlocked_achievements.iter().any(|a| a.id == id)
    }

    pub fn study_hours(&self) -> u32 {
        (self.total_study_minutes / 60) as u32
    }
}

/// Aggregate learner level derived from the mastered count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelEstimate {
    pub tier: CefrTier,
    pub mastered_count: usize,
    /// Percent of the way from this tier's lower threshold to the
    /// next, clamped to [0, 100]
    pub next_level_progress: u32,
}

/// Totals for one calendar week of sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub session_count: usize,
    pub total_minutes: u64,
    pub words_studied: u32,
    pub exercises_completed: u32,
    /// Minutes per day, averaged over days that had a session
    pub average_daily_minutes: u64,
}

/// Everything the progress screen needs in one read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_words: usize,
    pub mastered_words: usize,
    pub retention_rate_percent: u32,
    /// Words mastered per week over the trailing month
    pub learning_velocity: f64,
    pub level: LevelEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_fluency_date: Option<NaiveDate>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_study_minutes: u64,
    pub strongest_skills: Vec<Skill>,
    pub weakest_skills: Vec<Skill>,
}
