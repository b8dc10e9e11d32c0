use anyhow::Result;
use chrono::Utc;
use wortschatz::storage::LearnerContext;
use wortschatz::vocabulary::{ReviewStatus, VocabularyItem};
use wortschatz::Trainer;

use crate::OutputFormat;

pub fn run(trainer: &Trainer, ctx: &LearnerContext, due: bool, format: &OutputFormat) -> Result<()> {
    let items = if due {
        trainer.vocabulary.due_for_review(ctx, Utc::now())?
    } else {
        let mut all = trainer.vocabulary.get_all(ctx)?;
        all.sort_by(|a, b| a.word.to_lowercase().cmp(&b.word.to_lowercase()));
        all
    };

    print_items(&items, format)
}

/// Shared item-list rendering for list, search, and sample
pub fn print_items(items: &[VocabularyItem], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Plain => {
            if items.is_empty() {
                println!("(no words)");
                return Ok(());
            }
            for item in items {
                let marker = match item.status() {
                    ReviewStatus::New => " ",
                    ReviewStatus::Learning => "~",
                    ReviewStatus::Mastered => "*",
                };
                println!(
                    "{} {} ({}) [{}] reviews: {}, interval: {}d",
                    marker,
                    item.word,
                    item.translation,
                    item.difficulty,
                    item.times_reviewed,
                    item.review_interval_days
                );
            }
        }
    }
    Ok(())
}
