//! Wortschatz: the vocabulary and progress core of a German-learning
//! application.
//!
//! The crate owns durable vocabulary items with spaced-repetition
//! scheduling, the study-session log, the derived progress analytics,
//! and achievement unlocking. Rendering, prompting of the generative
//! text service, and audio synthesis live in the host application and
//! are reached only through the narrow contracts in [`collaborators`].

use std::path::PathBuf;

use chrono::Utc;

pub mod achievements;
pub mod collaborators;
pub mod progress;
pub mod sessions;
pub mod storage;
pub mod vocabulary;

use achievements::{AchievementDef, AggregateSnapshot};
use collaborators::{CancellationToken, GeneratedItem};
use progress::{analytics, ProfileStorage, ProgressSummary};
use sessions::{SessionLog, StudySession};
use storage::{
    load_settings, DataRoot, LearnerContext, Result, TrainerSettings,
};
use vocabulary::{sample, ItemDraft, Origin, VocabularyItem, VocabularyStore};

/// The assembled core: every store opened on one data directory.
/// A host application holds exactly one of these and passes a
/// [`LearnerContext`] per call to select the owner scope.
pub struct Trainer {
    pub vocabulary: VocabularyStore,
    pub sessions: SessionLog,
    pub profiles: ProfileStorage,
    pub settings: TrainerSettings,
}

impl Trainer {
    /// Open (and if necessary create) the data directory and all
    /// stores inside it
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let root = DataRoot::new(data_dir);
        root.init()?;

        let settings = load_settings(&root.settings_path())?;
        let vocabulary = VocabularyStore::new(&root, settings.scheduler.clone())?;
        let sessions = SessionLog::new(&root)?;
        let profiles = ProfileStorage::new(&root)?;

        log::info!("opened trainer data at {}", root.path().display());

        Ok(Self {
            vocabulary,
            sessions,
            profiles,
            settings,
        })
    }

    /// Open the trainer in the platform data directory
    pub fn open_default() -> Result<Self> {
        Self::open(DataRoot::default_data_dir()?)
    }

    /// Draw a working set for a study session. `n` and
    /// `mastered_fraction` fall back to the configured defaults.
    pub fn sample_session(
        &self,
        ctx: &LearnerContext,
        n: Option<usize>,
        mastered_fraction: Option<f64>,
    ) -> Result<Vec<VocabularyItem>> {
        let items = self.vocabulary.get_all(ctx)?;
        let n = n.unwrap_or(self.settings.sampler.session_size);
        let fraction = mastered_fraction.unwrap_or(self.settings.sampler.mastered_fraction);
        Ok(sample(items, n, fraction, &mut rand::thread_rng()))
    }

    /// Record a completed study session: append it to the log, fold it
    /// into the profile (minutes, skills, streaks), and evaluate
    /// achievements. Returns the newly unlocked achievements.
    pub fn record_session(
        &self,
        ctx: &LearnerContext,
        session: &StudySession,
    ) -> Result<Vec<&'static AchievementDef>> {
        self.sessions.log_session(ctx, session)?;

        let mut profile = self.profiles.load(ctx)?;
        analytics::apply_session(&mut profile, session);

        let session_days: Vec<_> = self
            .sessions
            .list_sessions(ctx)?
            .iter()
            .map(|s| s.started_at.date_naive())
            .collect();
        analytics::refresh_streaks(&mut profile, &session_days, Utc::now().date_naive());

        let snapshot = AggregateSnapshot {
            mastered_count: self.vocabulary.mastered_count(ctx)? as u32,
            current_streak: profile.current_streak,
            grammar_topics: profile.grammar_topics,
            study_hours: profile.study_hours(),
        };
        let newly_unlocked = achievements::evaluate(&snapshot, &mut profile, Utc::now());

        self.profiles.save(ctx, &mut profile)?;
        Ok(newly_unlocked)
    }

    /// Insert items produced by the text-generation collaborator,
    /// skipping anything already known
    pub fn add_generated(
        &self,
        ctx: &LearnerContext,
        items: Vec<GeneratedItem>,
        cancel: Option<&CancellationToken>,
    ) -> Result<usize> {
        let drafts = items
            .into_iter()
            .map(|g| ItemDraft::new(g.word, g.translation, g.example))
            .collect();
        self.vocabulary.add_batch(ctx, drafts, Origin::Generated, cancel)
    }

    /// Totals for the week starting at `week_start`
    pub fn weekly_stats(
        &self,
        ctx: &LearnerContext,
        week_start: chrono::NaiveDate,
    ) -> Result<progress::WeeklyStats> {
        let start = week_start.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let sessions = self
            .sessions
            .sessions_in_range(ctx, start, start + chrono::Duration::days(7))?;
        Ok(analytics::weekly_stats(&sessions, week_start))
    }

    /// Everything the progress screen shows, derived in one pass
    pub fn progress_summary(&self, ctx: &LearnerContext) -> Result<ProgressSummary> {
        let items = self.vocabulary.get_all(ctx)?;
        let profile = self.profiles.load(ctx)?;
        let now = Utc::now();

        let mastered_words = items.iter().filter(|i| i.mastered).count();
        let total_reviews: u64 = items.iter().map(|i| i.times_reviewed as u64).sum();
        let learning_velocity = analytics::learning_velocity(&items, now);
        let level = analytics::level_estimate(mastered_words);

        Ok(ProgressSummary {
            total_words: items.len(),
            mastered_words,
            retention_rate_percent: analytics::retention_rate(mastered_words, total_reviews),
            learning_velocity,
            level,
            projected_fluency_date: analytics::projected_fluency_date(
                mastered_words,
                self.settings.fluency_target_words,
                learning_velocity,
                now.date_naive(),
            ),
            current_streak: profile.current_streak,
            longest_streak: profile.longest_streak,
            total_study_minutes: profile.total_study_minutes,
            strongest_skills: analytics::strongest_skills(&profile.skills),
            weakest_skills: analytics::weakest_skills(&profile.skills),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::Skill;
    use chrono::Duration;
    use tempfile::TempDir;

    fn open_trainer(dir: &TempDir) -> Trainer {
        Trainer::open(dir.path().to_path_buf()).unwrap()
    }

    fn finished_session(minutes: i64) -> StudySession {
        let end = Utc::now();
        let mut session = StudySession::new(end - Duration::minutes(minutes), end);
        session.words_studied = 10;
        session.exercises_completed = 4;
        session.topics_reviewed = 1;
        session.skills = vec![Skill::Vocabulary, Skill::Grammar];
        session
    }

    #[test]
    fn test_record_session_updates_profile_and_achievements() {
        let dir = TempDir::new().unwrap();
        let trainer = open_trainer(&dir);
        let ctx = LearnerContext::learner("anna");

        trainer
            .vocabulary
            .add(&ctx, ItemDraft::new("Haus", "house", ""), Origin::Seed)
            .unwrap();
        trainer.vocabulary.mark_reviewed(&ctx, "Haus", true).unwrap();

        let unlocked = trainer.record_session(&ctx, &finished_session(30)).unwrap();
        assert!(unlocked.iter().any(|d| d.id == "first-word"));

        let profile = trainer.profiles.load(&ctx).unwrap();
        assert_eq!(profile.total_study_minutes, 30);
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.skills.vocabulary, 1);
        assert!(profile.has_achievement("first-word"));
    }

    #[test]
    fn test_achievements_unlock_only_once() {
        let dir = TempDir::new().unwrap();
        let trainer = open_trainer(&dir);
        let ctx = LearnerContext::learner("anna");

        trainer
            .vocabulary
            .add(&ctx, ItemDraft::new("Haus", "house", ""), Origin::Seed)
            .unwrap();
        trainer.vocabulary.mark_reviewed(&ctx, "Haus", true).unwrap();

        let first = trainer.record_session(&ctx, &finished_session(10)).unwrap();
        assert!(!first.is_empty());
        let second = trainer.record_session(&ctx, &finished_session(10)).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_progress_summary_fresh_learner() {
        let dir = TempDir::new().unwrap();
        let trainer = open_trainer(&dir);
        let ctx = LearnerContext::learner("anna");

        let summary = trainer.progress_summary(&ctx).unwrap();
        assert_eq!(summary.total_words, 0);
        assert_eq!(summary.retention_rate_percent, 0);
        assert_eq!(summary.level.tier, vocabulary::CefrTier::A1);
        // No velocity yet, so no projection
        assert!(summary.projected_fluency_date.is_none());
    }

    #[test]
    fn test_progress_summary_with_activity() {
        let dir = TempDir::new().unwrap();
        let trainer = open_trainer(&dir);
        let ctx = LearnerContext::learner("anna");

        for word in ["eins", "zwei", "drei", "vier"] {
            trainer
                .vocabulary
                .add(&ctx, ItemDraft::new(word, "n", ""), Origin::Seed)
                .unwrap();
        }
        trainer.vocabulary.mark_reviewed(&ctx, "eins", true).unwrap();
        trainer.vocabulary.mark_reviewed(&ctx, "zwei", true).unwrap();
        trainer.vocabulary.mark_reviewed(&ctx, "drei", false).unwrap();

        let summary = trainer.progress_summary(&ctx).unwrap();
        assert_eq!(summary.total_words, 4);
        assert_eq!(summary.mastered_words, 2);
        assert_eq!(summary.retention_rate_percent, 67); // 2 of 3 reviews
        assert!(summary.learning_velocity > 0.0);
        assert!(summary.projected_fluency_date.is_some());
    }

    #[test]
    fn test_add_generated_skips_known_words() {
        let dir = TempDir::new().unwrap();
        let trainer = open_trainer(&dir);
        let ctx = LearnerContext::learner("anna");

        trainer
            .vocabulary
            .add(&ctx, ItemDraft::new("Haus", "house", ""), Origin::Seed)
            .unwrap();

        let generated = vec![
            GeneratedItem {
                word: "Haus".to_string(),
                translation: "house".to_string(),
                example: String::new(),
            },
            GeneratedItem {
                word: "Garten".to_string(),
                translation: "garden".to_string(),
                example: "Der Garten blüht.".to_string(),
            },
        ];
        let inserted = trainer.add_generated(&ctx, generated, None).unwrap();
        assert_eq!(inserted, 1);

        let item = trainer.vocabulary.get(&ctx, "Garten").unwrap().unwrap();
        assert_eq!(item.origin, Origin::Generated);
    }

    struct CannedGenerator;

    impl collaborators::TextGenerator for CannedGenerator {
        fn generate_items(
            &self,
            count: usize,
            _difficulty: vocabulary::CefrTier,
            _themes: &[String],
        ) -> std::result::Result<Vec<GeneratedItem>, collaborators::GenerationError> {
            Ok((0..count)
                .map(|i| GeneratedItem {
                    word: format!("Wort{}", i),
                    translation: format!("word {}", i),
                    example: String::new(),
                })
                .collect())
        }

        fn translate(
            &self,
            word: &str,
        ) -> std::result::Result<collaborators::Translation, collaborators::GenerationError> {
            Ok(collaborators::Translation {
                translation: format!("{}-en", word),
                example: String::new(),
            })
        }
    }

    #[test]
    fn test_generator_feeds_the_store() {
        use collaborators::TextGenerator;

        let dir = TempDir::new().unwrap();
        let trainer = open_trainer(&dir);
        let ctx = LearnerContext::learner("anna");

        let generated = CannedGenerator
            .generate_items(5, vocabulary::CefrTier::A2, &[])
            .unwrap();
        let inserted = trainer.add_generated(&ctx, generated, None).unwrap();
        assert_eq!(inserted, 5);

        let translation = CannedGenerator.translate("Haus").unwrap();
        assert_eq!(translation.translation, "Haus-en");
    }

    #[test]
    fn test_weekly_stats_counts_this_week() {
        let dir = TempDir::new().unwrap();
        let trainer = open_trainer(&dir);
        let ctx = LearnerContext::learner("anna");

        let session = finished_session(20);
        let week_start = session.started_at.date_naive();
        trainer.record_session(&ctx, &session).unwrap();

        let stats = trainer.weekly_stats(&ctx, week_start).unwrap();
        assert_eq!(stats.session_count, 1);
        assert_eq!(stats.total_minutes, 20);
        assert_eq!(stats.average_daily_minutes, 20);

        // A week with no sessions
        let empty = trainer
            .weekly_stats(&ctx, week_start - Duration::days(70))
            .unwrap();
        assert_eq!(empty.session_count, 0);
        assert_eq!(empty.average_daily_minutes, 0);
    }

    #[test]
    fn test_sample_session_uses_configured_defaults() {
        let dir = TempDir::new().unwrap();
        let trainer = open_trainer(&dir);
        let ctx = LearnerContext::learner("anna");

        for i in 0..40 {
            trainer
                .vocabulary
                .add(&ctx, ItemDraft::new(format!("wort{}", i), "w", ""), Origin::Seed)
                .unwrap();
        }

        let set = trainer.sample_session(&ctx, None, None).unwrap();
        assert_eq!(set.len(), 25);

        let small = trainer.sample_session(&ctx, Some(5), None).unwrap();
        assert_eq!(small.len(), 5);
    }
}
