use anyhow::Result;
use wortschatz::storage::LearnerContext;
use wortschatz::Trainer;

use crate::OutputFormat;

pub fn run(
    trainer: &Trainer,
    ctx: &LearnerContext,
    word: &str,
    was_correct: bool,
    format: &OutputFormat,
) -> Result<()> {
    let item = trainer.vocabulary.mark_reviewed(ctx, word, was_correct)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&item)?),
        OutputFormat::Plain => {
            let outcome = if was_correct { "correct" } else { "incorrect" };
            let next = item
                .next_review
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "now".to_string());
            println!(
                "{}: {} (interval {}d, next review {})",
                outcome, item.word, item.review_interval_days, next
            );
        }
    }

    Ok(())
}
