use anyhow::Result;
use wortschatz::storage::LearnerContext;
use wortschatz::Trainer;

use super::list::print_items;
use crate::OutputFormat;

pub fn run(
    trainer: &Trainer,
    ctx: &LearnerContext,
    query: &str,
    format: &OutputFormat,
) -> Result<()> {
    let items = trainer.vocabulary.search(ctx, query)?;
    print_items(&items, format)
}
