//! Contracts for the external services the core depends on
//!
//! The generative-text and speech services are opaque collaborators.
//! Only their call shapes live here; transport and prompting belong to
//! the host application.

mod cancel;
pub mod speech;
pub mod text_gen;

pub use cancel::CancellationToken;
pub use speech::{speak_best_effort, LoggingSpeech, SpeechError, SpeechSynthesizer};
pub use text_gen::{
    parse_generated_payload, GeneratedItem, GenerationError, GenerationOutcome, TextGenerator,
    Translation,
};
