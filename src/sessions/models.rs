use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The six tracked language skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Vocabulary,
    Grammar,
    Listening,
    Speaking,
    Reading,
    Writing,
}

impl Skill {
    /// Fixed declaration order, used as the stable tie-break order for
    /// skill rankings
    pub const ALL: [Skill; 6] = [
        Skill::Vocabulary,
        Skill::Grammar,
        Skill::Listening,
        Skill::Speaking,
        Skill::Reading,
        Skill::Writing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Skill::Vocabulary => "vocabulary",
            Skill::Grammar => "grammar",
            Skill::Listening => "listening",
            Skill::Speaking => "speaking",
            Skill::Reading => "reading",
            Skill::Writing => "writing",
        }
    }
}

/// A closed interval of study activity. Logged once, at session end,
/// and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    #[serde(default)]
    pub words_studied: u32,
    #[serde(default)]
    pub exercises_completed: u32,
    #[serde(default)]
    pub topics_reviewed: u32,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl StudySession {
    pub fn new(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at,
            ended_at,
            words_studied: 0,
            exercises_completed: 0,
            topics_reviewed: 0,
            skills: Vec::new(),
        }
    }

    /// Session length in whole minutes, never negative
    pub fn duration_minutes(&self) -> u32 {
        let minutes = (self.ended_at - self.started_at).num_minutes();
        minutes.max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_duration_minutes() {
        let start = Utc::now();
        let session = StudySession::new(start, start + Duration::minutes(25));
        assert_eq!(session.duration_minutes(), 25);

        // A clock skew must not produce a negative duration
        let skewed = StudySession::new(start, start - Duration::minutes(5));
        assert_eq!(skewed.duration_minutes(), 0);
    }
}
