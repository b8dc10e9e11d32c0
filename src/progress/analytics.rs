//! Derived statistics over the vocabulary store and session log
//!
//! Everything here is a pure function of the passed-in state. The
//! stores hold the facts, this module only derives numbers from them.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::models::{LearnerProfile, LevelEstimate, SkillLevels, WeeklyStats};
use crate::sessions::{Skill, StudySession};
use crate::vocabulary::{CefrTier, VocabularyItem};

/// Mastered-count thresholds for the aggregate learner level. A tier
/// is reached at its lower bound.
pub const LEVEL_THRESHOLDS: [(CefrTier, usize); 6] = [
    (CefrTier::A1, 0),
    (CefrTier::A2, 50),
    (CefrTier::B1, 150),
    (CefrTier::B2, 300),
    (CefrTier::C1, 500),
    (CefrTier::C2, 750),
];

/// Share of reviews that ended in mastery, as a rounded percent.
/// 0 when nothing has been reviewed yet.
pub fn retention_rate(mastered_count: usize, total_reviews: u64) -> u32 {
    if total_reviews == 0 {
        return 0;
    }
    ((mastered_count as f64 / total_reviews as f64) * 100.0).round() as u32
}

/// Words mastered per week, measured over the trailing 30 days
pub fn learning_velocity(items: &[VocabularyItem], now: DateTime<Utc>) -> f64 {
    let window_start = now - Duration::days(30);
    let recent = items
        .iter()
        .filter(|item| {
            item.mastered_date
                .map(|d| d > window_start && d <= now)
                .unwrap_or(false)
        })
        .count();
    (recent as f64 / 30.0) * 7.0
}

/// Map a mastered count onto the six-tier scale with progress toward
/// the next tier
pub fn level_estimate(mastered_count: usize) -> LevelEstimate {
    let mut tier = CefrTier::A1;
    let mut lower = 0;
    let mut upper = None;

    for (index, (candidate, threshold)) in LEVEL_THRESHOLDS.iter().enumerate() {
        if mastered_count >= *threshold {
            tier = *candidate;
            lower = *threshold;
            upper = LEVEL_THRESHOLDS.get(index + 1).map(|(_, t)| *t);
        }
    }

    let next_level_progress = match upper {
        // Top tier has nowhere further to go
        None => 100,
        Some(upper) => {
            let span = (upper - lower) as f64;
            let into = (mastered_count - lower) as f64;
            ((into / span) * 100.0).round().clamp(0.0, 100.0) as u32
        }
    };

    LevelEstimate {
        tier,
        mastered_count,
        next_level_progress,
    }
}

/// Projected date of reaching the fluency target at the current
/// velocity. Unknown (None) when the velocity is zero, a learner who
/// mastered nothing this month gets no date rather than a bogus one.
pub fn projected_fluency_date(
    mastered_count: usize,
    target_mastered_count: usize,
    velocity_per_week: f64,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if velocity_per_week <= 0.0 {
        return None;
    }
    let remaining = target_mastered_count.saturating_sub(mastered_count);
    let weeks = (remaining as f64 / velocity_per_week).ceil() as i64;
    Some(today + Duration::weeks(weeks))
}

/// Sum the sessions whose start falls in `[week_start, week_start+7d)`
pub fn weekly_stats(sessions: &[StudySession], week_start: NaiveDate) -> WeeklyStats {
    let week_end = week_start + Duration::days(7);

    let mut stats = WeeklyStats {
        week_start,
        session_count: 0,
        total_minutes: 0,
        words_studied: 0,
        exercises_completed: 0,
        average_daily_minutes: 0,
    };

    let mut days_with_sessions: HashSet<NaiveDate> = HashSet::new();

    for session in sessions {
        let day = session.started_at.date_naive();
        if day < week_start || day >= week_end {
            continue;
        }
        stats.session_count += 1;
        stats.total_minutes += session.duration_minutes() as u64;
        stats.words_studied += session.words_studied;
        stats.exercises_completed += session.exercises_completed;
        days_with_sessions.insert(day);
    }

    if !days_with_sessions.is_empty() {
        stats.average_daily_minutes = stats.total_minutes / days_with_sessions.len() as u64;
    }

    stats
}

/// Top two skills by level, ties broken by the fixed skill order
pub fn strongest_skills(levels: &SkillLevels) -> Vec<Skill> {
    ranked_skills(levels).into_iter().take(2).collect()
}

/// Bottom two skills by level, ties broken by the fixed skill order
pub fn weakest_skills(levels: &SkillLevels) -> Vec<Skill> {
    ranked_skills(levels).into_iter().skip(4).collect()
}

fn ranked_skills(levels: &SkillLevels) -> Vec<Skill> {
    let mut pairs = levels.as_pairs().to_vec();
    // Stable sort keeps declaration order for equal levels
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs.into_iter().map(|(skill, _)| skill).collect()
}

/// Consecutive-day streak ending at today (or yesterday, since today
/// may simply not be over yet)
pub fn current_streak(session_days: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = session_days.iter().copied().collect();
    if days.is_empty() {
        return 0;
    }

    let mut streak = 0;
    let mut check_date = today;

    if days.contains(&check_date) {
        streak = 1;
        check_date -= Duration::days(1);
    } else {
        check_date -= Duration::days(1);
        if !days.contains(&check_date) {
            return 0;
        }
        streak = 1;
        check_date -= Duration::days(1);
    }

    while days.contains(&check_date) {
        streak += 1;
        check_date -= Duration::days(1);
    }

    streak
}

/// Longest run of consecutive study days anywhere in the log
pub fn longest_streak(session_days: &[NaiveDate]) -> u32 {
    let mut days: Vec<NaiveDate> = session_days.iter().copied().collect();
    days.sort();
    days.dedup();

    if days.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut current = 1;
    for i in 1..days.len() {
        if days[i] - days[i - 1] == Duration::days(1) {
            current += 1;
        } else {
            longest = longest.max(current);
            current = 1;
        }
    }
    longest.max(current)
}

/// Fold one completed session into the profile: study time, the
/// grammar-topics counter, and a small bump for each skill touched.
/// Streaks are refreshed separately because they need the whole log.
pub fn apply_session(profile: &mut LearnerProfile, session: &StudySession) {
    profile.total_study_minutes += session.duration_minutes() as u64;
    profile.grammar_topics += session.topics_reviewed;

    let touched: HashSet<Skill> = session.skills.iter().copied().collect();
    for skill in Skill::ALL {
        if touched.contains(&skill) {
            profile.skills.bump(skill, 1);
        }
    }
}

/// Recompute both streak counters from the full set of session days
pub fn refresh_streaks(profile: &mut LearnerProfile, session_days: &[NaiveDate], today: NaiveDate) {
    profile.current_streak = current_streak(session_days, today);
    profile.longest_streak = profile.longest_streak.max(longest_streak(session_days));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{ItemDraft, Origin};
    use chrono::Utc;

    fn mastered_item(days_ago: i64, now: DateTime<Utc>) -> VocabularyItem {
        let mut item = VocabularyItem::new(ItemDraft::new("w", "t", ""), Origin::Seed);
        item.mastered = true;
        item.mastered_date = Some(now - Duration::days(days_ago));
        item
    }

    #[test]
    fn test_retention_rate() {
        assert_eq!(retention_rate(0, 0), 0);
        assert_eq!(retention_rate(5, 0), 0);
        assert_eq!(retention_rate(1, 3), 33);
        assert_eq!(retention_rate(2, 3), 67);
        assert_eq!(retention_rate(10, 10), 100);
    }

    #[test]
    fn test_learning_velocity_window() {
        let now = Utc::now();
        let items = vec![
            mastered_item(5, now),
            mastered_item(29, now),
            mastered_item(45, now), // outside the window
        ];
        let velocity = learning_velocity(&items, now);
        assert!((velocity - (2.0 / 30.0) * 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_learning_velocity_empty() {
        assert_eq!(learning_velocity(&[], Utc::now()), 0.0);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_estimate(0).tier, CefrTier::A1);
        assert_eq!(level_estimate(49).tier, CefrTier::A1);
        assert_eq!(level_estimate(50).tier, CefrTier::A2);
        assert_eq!(level_estimate(299).tier, CefrTier::B1);
        assert_eq!(level_estimate(500).tier, CefrTier::C1);
        assert_eq!(level_estimate(750).tier, CefrTier::C2);
        assert_eq!(level_estimate(2000).tier, CefrTier::C2);
    }

    #[test]
    fn test_next_level_progress() {
        assert_eq!(level_estimate(0).next_level_progress, 0);
        assert_eq!(level_estimate(25).next_level_progress, 50);
        assert_eq!(level_estimate(100).next_level_progress, 50);
        // Top tier pins to 100
        assert_eq!(level_estimate(750).next_level_progress, 100);
    }

    #[test]
    fn test_projected_fluency_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        // 100 words remaining at 10 words/week
        let date = projected_fluency_date(650, 750, 10.0, today).unwrap();
        assert_eq!(date, today + Duration::weeks(10));

        // Fractional weeks round up
        let date = projected_fluency_date(650, 750, 3.0, today).unwrap();
        assert_eq!(date, today + Duration::weeks(34));

        // Already at the target
        let date = projected_fluency_date(800, 750, 5.0, today).unwrap();
        assert_eq!(date, today);

        // No velocity means no projection
        assert!(projected_fluency_date(650, 750, 0.0, today).is_none());
    }

    #[test]
    fn test_weekly_stats() {
        let week_start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let monday = week_start.and_hms_opt(9, 0, 0).unwrap().and_utc();

        let mut inside_a = StudySession::new(monday, monday + Duration::minutes(30));
        inside_a.words_studied = 12;
        let inside_b = StudySession::new(
            monday + Duration::hours(8),
            monday + Duration::hours(8) + Duration::minutes(10),
        );
        let wednesday = monday + Duration::days(2);
        let inside_c = StudySession::new(wednesday, wednesday + Duration::minutes(20));
        let next_week = monday + Duration::days(7);
        let outside = StudySession::new(next_week, next_week + Duration::minutes(60));

        let sessions = vec![inside_a, inside_b, inside_c, outside];
        let stats = weekly_stats(&sessions, week_start);

        assert_eq!(stats.session_count, 3);
        assert_eq!(stats.total_minutes, 60);
        assert_eq!(stats.words_studied, 12);
        // Two distinct study days
        assert_eq!(stats.average_daily_minutes, 30);
    }

    #[test]
    fn test_weekly_stats_empty_week() {
        let week_start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let stats = weekly_stats(&[], week_start);
        assert_eq!(stats.session_count, 0);
        assert_eq!(stats.average_daily_minutes, 0);
    }

    #[test]
    fn test_skill_ranking_stable_ties() {
        let mut levels = SkillLevels::default();
        levels.listening = 40;
        levels.grammar = 40;
        levels.writing = 10;

        // Grammar comes before listening in declaration order
        assert_eq!(strongest_skills(&levels), vec![Skill::Grammar, Skill::Listening]);
        // All-zero tail keeps declaration order too
        assert_eq!(weakest_skills(&levels), vec![Skill::Reading, Skill::Writing]);
    }

    #[test]
    fn test_current_streak_today_or_yesterday() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let yesterday = today - Duration::days(1);

        assert_eq!(current_streak(&[today, yesterday], today), 2);
        // Today not studied yet, streak anchored at yesterday
        assert_eq!(
            current_streak(&[yesterday, yesterday - Duration::days(1)], today),
            2
        );
        // A gap ends the streak
        assert_eq!(current_streak(&[today - Duration::days(2)], today), 0);
        assert_eq!(current_streak(&[], today), 0);
    }

    #[test]
    fn test_longest_streak() {
        let d = |day: u32| NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        assert_eq!(longest_streak(&[]), 0);
        assert_eq!(longest_streak(&[d(1)]), 1);
        // Two runs, the longer one wins; duplicates collapse
        assert_eq!(
            longest_streak(&[d(1), d(2), d(3), d(3), d(10), d(11)]),
            3
        );
    }

    #[test]
    fn test_apply_session_updates_profile() {
        let mut profile = LearnerProfile::default();
        let now = Utc::now();
        let mut session = StudySession::new(now, now + Duration::minutes(45));
        session.topics_reviewed = 2;
        session.skills = vec![Skill::Grammar, Skill::Grammar, Skill::Reading];

        apply_session(&mut profile, &session);

        assert_eq!(profile.total_study_minutes, 45);
        assert_eq!(profile.grammar_topics, 2);
        // Duplicate skill entries only bump once
        assert_eq!(profile.skills.grammar, 1);
        assert_eq!(profile.skills.reading, 1);
        assert_eq!(profile.skills.listening, 0);
    }

    #[test]
    fn test_refresh_streaks_longest_never_shrinks() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let mut profile = LearnerProfile::default();
        profile.longest_streak = 9;

        refresh_streaks(&mut profile, &[today], today);
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.longest_streak, 9);
    }
}
