mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wortschatz::storage::LearnerContext;
use wortschatz::Trainer;

#[derive(Parser)]
#[command(name = "wortschatz-cli", about = "German vocabulary trainer", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Learner scope id (omit to work on the shared global corpus)
    #[arg(long, global = true)]
    learner: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word to the vocabulary
    Add {
        /// German word or phrase
        word: String,
        /// Translation
        translation: String,
        /// Example sentence
        #[arg(long)]
        example: Option<String>,
    },

    /// List words in the visible scope
    List {
        /// Show only words due for review
        #[arg(long)]
        due: bool,
    },

    /// Search words by source or translation text
    Search {
        /// Substring to look for
        query: String,
    },

    /// Record a review outcome for a word
    Review {
        /// The reviewed word
        word: String,
        /// Record the review as failed
        #[arg(long)]
        incorrect: bool,
    },

    /// Draw a study working set
    Sample {
        /// Number of words to draw
        #[arg(long)]
        count: Option<usize>,
        /// Share of mastered words in the draw
        #[arg(long)]
        mastered_fraction: Option<f64>,
    },

    /// Show progress statistics
    Stats,

    /// Session log commands
    #[command(subcommand)]
    Sessions(SessionsCommand),

    /// Show achievements and progress toward them
    Achievements,

    /// Export the vocabulary to a JSON document
    Export {
        /// Output file
        output: PathBuf,
    },

    /// Import a previously exported JSON document
    Import {
        /// Input file
        input: PathBuf,
    },
}

#[derive(Subcommand)]
enum SessionsCommand {
    /// Log a finished study session
    Log {
        /// Session length in minutes
        #[arg(long)]
        minutes: u32,
        /// Words studied
        #[arg(long, default_value = "0")]
        words: u32,
        /// Exercises completed
        #[arg(long, default_value = "0")]
        exercises: u32,
        /// Grammar topics reviewed
        #[arg(long, default_value = "0")]
        topics: u32,
        /// Comma-separated skills touched (vocabulary, grammar,
        /// listening, speaking, reading, writing)
        #[arg(long)]
        skills: Option<String>,
    },

    /// List logged sessions
    List,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let ctx = match &cli.learner {
        Some(id) => LearnerContext::learner(id.clone()),
        None => LearnerContext::global(),
    };

    let trainer = match cli.data_dir {
        Some(dir) => Trainer::open(dir)?,
        None => Trainer::open_default()?,
    };

    match cli.command {
        Command::Add {
            word,
            translation,
            example,
        } => commands::add::run(&trainer, &ctx, &word, &translation, example, &cli.format)?,
        Command::List { due } => commands::list::run(&trainer, &ctx, due, &cli.format)?,
        Command::Search { query } => commands::search::run(&trainer, &ctx, &query, &cli.format)?,
        Command::Review { word, incorrect } => {
            commands::review::run(&trainer, &ctx, &word, !incorrect, &cli.format)?
        }
        Command::Sample {
            count,
            mastered_fraction,
        } => commands::sample::run(&trainer, &ctx, count, mastered_fraction, &cli.format)?,
        Command::Stats => commands::stats::run(&trainer, &ctx, &cli.format)?,
        Command::Sessions(subcmd) => match subcmd {
            SessionsCommand::Log {
                minutes,
                words,
                exercises,
                topics,
                skills,
            } => commands::sessions::run_log(
                &trainer,
                &ctx,
                minutes,
                words,
                exercises,
                topics,
                skills.as_deref(),
                &cli.format,
            )?,
            SessionsCommand::List => commands::sessions::run_list(&trainer, &ctx, &cli.format)?,
        },
        Command::Achievements => commands::achievements::run(&trainer, &ctx, &cli.format)?,
        Command::Export { output } => commands::export::run_export(&trainer, &ctx, &output)?,
        Command::Import { input } => {
            commands::export::run_import(&trainer, &ctx, &input, &cli.format)?
        }
    }

    Ok(())
}
