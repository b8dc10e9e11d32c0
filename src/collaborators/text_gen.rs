//! Contract for the external text-generation service
//!
//! The service itself (prompting, transport, model choice) lives
//! outside this crate. The core only sees the trait below plus a
//! strict parse boundary: raw payloads are classified into a tagged
//! outcome before anything touches the store, so partially shaped
//! records never leak inward.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocabulary::CefrTier;

/// One generated vocabulary entry, fully shaped
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItem {
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub example: String,
}

/// A single-word translation with a usage example
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translation: String,
    #[serde(default)]
    pub example: String,
}

/// Failures of the generation collaborator. All of these are
/// retryable, user-visible conditions. The core never synthesizes
/// fallback content around them.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    #[error("generation service rate limited")]
    RateLimited,

    #[error("generation request rejected: {0}")]
    Rejected(String),
}

/// Narrow contract of the generative-text collaborator
pub trait TextGenerator {
    fn generate_items(
        &self,
        count: usize,
        difficulty: CefrTier,
        themes: &[String],
    ) -> Result<Vec<GeneratedItem>, GenerationError>;

    fn translate(&self, word: &str) -> Result<Translation, GenerationError>;
}

/// Classification of a raw generation payload
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// Payload parsed and every record is fully shaped
    Parsed(Vec<GeneratedItem>),
    /// Payload is not valid JSON at all
    ParseError { raw: String },
    /// Payload is JSON but does not match the expected shape
    SchemaInvalid { details: String },
}

/// Parse a raw payload from the generation service.
///
/// Accepts either a bare array of items or an object with an `items`
/// array. Records with an empty word or translation fail the whole
/// payload as schema-invalid rather than being silently dropped.
pub fn parse_generated_payload(raw: &str) -> GenerationOutcome {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => {
            return GenerationOutcome::ParseError {
                raw: raw.to_string(),
            }
        }
    };

    let records = match &value {
        serde_json::Value::Array(_) => value.clone(),
        serde_json::Value::Object(map) => match map.get("items") {
            Some(items @ serde_json::Value::Array(_)) => items.clone(),
            _ => {
                return GenerationOutcome::SchemaInvalid {
                    details: "expected an array or an object with an `items` array".to_string(),
                }
            }
        },
        _ => {
            return GenerationOutcome::SchemaInvalid {
                details: format!("expected an array, got {}", type_name(&value)),
            }
        }
    };

    let items: Vec<GeneratedItem> = match serde_json::from_value(records) {
        Ok(items) => items,
        Err(e) => {
            return GenerationOutcome::SchemaInvalid {
                details: e.to_string(),
            }
        }
    };

    for (index, item) in items.iter().enumerate() {
        if item.word.trim().is_empty() || item.translation.trim().is_empty() {
            return GenerationOutcome::SchemaInvalid {
                details: format!("record {} has an empty word or translation", index),
            };
        }
    }

    GenerationOutcome::Parsed(items)
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
