use anyhow::Result;
use wortschatz::storage::LearnerContext;
use wortschatz::Trainer;

use super::list::print_items;
use crate::OutputFormat;

pub fn run(
    trainer: &Trainer,
    ctx: &LearnerContext,
    count: Option<usize>,
    mastered_fraction: Option<f64>,
    format: &OutputFormat,
) -> Result<()> {
    let items = trainer.sample_session(ctx, count, mastered_fraction)?;
    print_items(&items, format)
}
