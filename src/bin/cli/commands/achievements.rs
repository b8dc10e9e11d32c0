use anyhow::Result;
use wortschatz::achievements::{progress_report, AggregateSnapshot};
use wortschatz::storage::LearnerContext;
use wortschatz::Trainer;

use crate::OutputFormat;

pub fn run(trainer: &Trainer, ctx: &LearnerContext, format: &OutputFormat) -> Result<()> {
    let profile = trainer.profiles.load(ctx)?;
    let snapshot = AggregateSnapshot {
        mastered_count: trainer.vocabulary.mastered_count(ctx)? as u32,
        current_streak: profile.current_streak,
        grammar_topics: profile.grammar_topics,
        study_hours: profile.study_hours(),
    };

    let report = progress_report(&snapshot, &profile);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => {
            for entry in report {
                let marker = if entry.unlocked { "[x]" } else { "[ ]" };
                println!(
                    "{} {} ({}/{}) {}",
                    marker, entry.name, entry.progress, entry.max_progress, entry.description
                );
            }
        }
    }

    Ok(())
}
