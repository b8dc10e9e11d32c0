use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use wortschatz::sessions::{Skill, StudySession};
use wortschatz::storage::LearnerContext;
use wortschatz::Trainer;

use crate::OutputFormat;

fn parse_skills(raw: Option<&str>) -> Result<Vec<Skill>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let mut skills = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let skill = Skill::ALL
            .iter()
            .find(|s| s.label().eq_ignore_ascii_case(part))
            .copied();
        match skill {
            Some(skill) => skills.push(skill),
            None => bail!("unknown skill: {}", part),
        }
    }
    Ok(skills)
}

pub fn run_log(
    trainer: &Trainer,
    ctx: &LearnerContext,
    minutes: u32,
    words: u32,
    exercises: u32,
    topics: u32,
    skills: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let ended_at = Utc::now();
    let mut session = StudySession::new(ended_at - Duration::minutes(minutes as i64), ended_at);
    session.words_studied = words;
    session.exercises_completed = exercises;
    session.topics_reviewed = topics;
    session.skills = parse_skills(skills)?;

    let unlocked = trainer.record_session(ctx, &session)?;

    match format {
        OutputFormat::Json => {
            let ids: Vec<&str> = unlocked.iter().map(|d| d.id).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "sessionId": session.id,
                    "unlockedAchievements": ids,
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("logged session {} ({} min)", session.id, minutes);
            for def in unlocked {
                println!("achievement unlocked: {} ({})", def.name, def.description);
            }
        }
    }

    Ok(())
}

pub fn run_list(trainer: &Trainer, ctx: &LearnerContext, format: &OutputFormat) -> Result<()> {
    let sessions = trainer.sessions.list_sessions(ctx)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sessions)?),
        OutputFormat::Plain => {
            if sessions.is_empty() {
                println!("(no sessions)");
                return Ok(());
            }
            for session in sessions {
                let skills: Vec<&str> = session.skills.iter().map(|s| s.label()).collect();
                println!(
                    "{}  {} min, {} words, {} exercises [{}]",
                    session.started_at.format("%Y-%m-%d %H:%M"),
                    session.duration_minutes(),
                    session.words_studied,
                    session.exercises_completed,
                    skills.join(", ")
                );
            }
        }
    }

    Ok(())
}
