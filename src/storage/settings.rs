//! Trainer settings document
//!
//! The scheduling and sampling constants were tuned by hand, so they
//! are persisted as data and can be adjusted without a rebuild.
//! Missing fields fall back to the shipped defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::file_storage::{write_json_atomic, Result};
use crate::vocabulary::{SamplerConfig, SchedulerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSettings {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
    /// Mastered-word count treated as "fluent" for the projection
    #[serde(default = "default_fluency_target")]
    pub fluency_target_words: usize,
}

fn default_fluency_target() -> usize {
    750
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            sampler: SamplerConfig::default(),
            fluency_target_words: default_fluency_target(),
        }
    }
}

/// Load settings from file, falling back to defaults when absent
pub fn load_settings(path: &Path) -> Result<TrainerSettings> {
    if !path.exists() {
        return Ok(TrainerSettings::default());
    }

    let content = fs::read_to_string(path)?;
    let settings: TrainerSettings = serde_json::from_str(&content)?;
    Ok(settings)
}

/// Save settings to file
pub fn save_settings(path: &Path, settings: &TrainerSettings) -> Result<()> {
    write_json_atomic(path, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.scheduler.interval_ceiling_days, 90);
        assert_eq!(settings.sampler.session_size, 25);
        assert_eq!(settings.fluency_target_words, 750);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"fluencyTargetWords": 500}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.fluency_target_words, 500);
        assert_eq!(settings.scheduler.growth_factor, 2.0);
        assert!((settings.sampler.mastered_fraction - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = TrainerSettings::default();
        settings.scheduler.interval_ceiling_days = 60;
        save_settings(&path, &settings).unwrap();

        let reloaded = load_settings(&path).unwrap();
        assert_eq!(reloaded.scheduler.interval_ceiling_days, 60);
    }
}
