//! Achievement catalog and unlock evaluation

pub mod engine;
pub mod models;

pub use engine::{evaluate, progress_report, CATALOG};
pub use models::{AchievementDef, AchievementProgress, AggregateSnapshot, Metric};
