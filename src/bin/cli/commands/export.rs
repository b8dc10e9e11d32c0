use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use wortschatz::storage::export::{export_vocabulary, import_vocabulary};
use wortschatz::storage::LearnerContext;
use wortschatz::Trainer;

use crate::OutputFormat;

pub fn run_export(trainer: &Trainer, ctx: &LearnerContext, output: &Path) -> Result<()> {
    let document = export_vocabulary(&trainer.vocabulary, ctx)?;
    let json = serde_json::to_string_pretty(&document)?;
    fs::write(output, json)
        .with_context(|| format!("cannot write export to {}", output.display()))?;
    println!("exported {} words to {}", document.item_count, output.display());
    Ok(())
}

pub fn run_import(
    trainer: &Trainer,
    ctx: &LearnerContext,
    input: &Path,
    format: &OutputFormat,
) -> Result<()> {
    let payload = fs::read_to_string(input)
        .with_context(|| format!("cannot read import from {}", input.display()))?;
    let report = import_vocabulary(&trainer.vocabulary, ctx, &payload, None)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => {
            println!(
                "imported {} words, skipped {} duplicates",
                report.imported_count, report.skipped_count
            );
            for error in &report.errors {
                println!("  record {} ({}): {}", error.index, error.word, error.reason);
            }
        }
    }

    Ok(())
}
