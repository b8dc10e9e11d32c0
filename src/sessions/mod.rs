//! Study-session log

pub mod models;
pub mod storage;

pub use models::{Skill, StudySession};
pub use storage::SessionLog;
