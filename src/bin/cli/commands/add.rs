use anyhow::Result;
use wortschatz::storage::LearnerContext;
use wortschatz::vocabulary::{ItemDraft, Origin};
use wortschatz::Trainer;

use crate::OutputFormat;

pub fn run(
    trainer: &Trainer,
    ctx: &LearnerContext,
    word: &str,
    translation: &str,
    example: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let draft = ItemDraft::new(word, translation, example.unwrap_or_default());
    // Adds to the shared corpus count as seed curation, adds in a
    // learner scope as words picked up from the learner's own material
    let origin = if ctx.scope.is_global() {
        Origin::Seed
    } else {
        Origin::Extracted
    };
    let item = trainer.vocabulary.add_strict(ctx, draft, origin)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&item)?),
        OutputFormat::Plain => {
            println!("added {} ({}) [{}]", item.word, item.translation, item.difficulty)
        }
    }

    Ok(())
}
