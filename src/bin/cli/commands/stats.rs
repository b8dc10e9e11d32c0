use anyhow::Result;
use wortschatz::storage::LearnerContext;
use wortschatz::Trainer;

use crate::OutputFormat;

pub fn run(trainer: &Trainer, ctx: &LearnerContext, format: &OutputFormat) -> Result<()> {
    let summary = trainer.progress_summary(ctx)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => {
            println!("words:          {} ({} mastered)", summary.total_words, summary.mastered_words);
            println!("retention:      {}%", summary.retention_rate_percent);
            println!("velocity:       {:.1} words/week", summary.learning_velocity);
            println!(
                "level:          {} ({}% to next)",
                summary.level.tier, summary.level.next_level_progress
            );
            match summary.projected_fluency_date {
                Some(date) => println!("fluency by:     {}", date),
                None => println!("fluency by:     unknown (no recent progress)"),
            }
            println!(
                "streak:         {} days (longest {})",
                summary.current_streak, summary.longest_streak
            );
            println!("study time:     {} min", summary.total_study_minutes);

            let strongest: Vec<&str> = summary.strongest_skills.iter().map(|s| s.label()).collect();
            let weakest: Vec<&str> = summary.weakest_skills.iter().map(|s| s.label()).collect();
            println!("strongest:      {}", strongest.join(", "));
            println!("weakest:        {}", weakest.join(", "));
        }
    }

    Ok(())
}
