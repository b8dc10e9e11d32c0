use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use super::models::LearnerProfile;
use crate::storage::file_storage::write_json_atomic;
use crate::storage::{DataRoot, LearnerContext, Result, StorageError};

/// Storage for learner profiles (one JSON document per scope)
pub struct ProfileStorage {
    profiles_dir: PathBuf,
}

impl ProfileStorage {
    pub fn new(root: &DataRoot) -> Result<Self> {
        let profiles_dir = root.profiles_dir();
        fs::create_dir_all(&profiles_dir).map_err(|e| {
            StorageError::Unavailable(format!(
                "cannot open profile storage at {}: {}",
                profiles_dir.display(),
                e
            ))
        })?;
        Ok(Self { profiles_dir })
    }

    fn profile_path(&self, ctx: &LearnerContext) -> PathBuf {
        self.profiles_dir
            .join(format!("{}.json", ctx.scope.storage_name()))
    }

    /// Load the profile for a scope, or a fresh default if none exists
    pub fn load(&self, ctx: &LearnerContext) -> Result<LearnerProfile> {
        let path = self.profile_path(ctx);
        if !path.exists() {
            return Ok(LearnerProfile::default());
        }

        let content = fs::read_to_string(&path)?;
        let profile: LearnerProfile = serde_json::from_str(&content)?;
        Ok(profile)
    }

    /// Save a profile, stamping its update time
    pub fn save(&self, ctx: &LearnerContext, profile: &mut LearnerProfile) -> Result<()> {
        profile.updated_at = Utc::now();
        write_json_atomic(&self.profile_path(ctx), profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::Skill;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_yields_default() {
        let dir = TempDir::new().unwrap();
        let root = DataRoot::new(dir.path().to_path_buf());
        root.init().unwrap();
        let storage = ProfileStorage::new(&root).unwrap();

        let profile = storage.load(&LearnerContext::learner("anna")).unwrap();
        assert_eq!(profile.current_streak, 0);
        assert!(profile.unlocked_achievements.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let root = DataRoot::new(dir.path().to_path_buf());
        root.init().unwrap();
        let storage = ProfileStorage::new(&root).unwrap();
        let ctx = LearnerContext::learner("anna");

        let mut profile = storage.load(&ctx).unwrap();
        profile.total_study_minutes = 90;
        profile.skills.bump(Skill::Listening, 5);
        storage.save(&ctx, &mut profile).unwrap();

        let reloaded = storage.load(&ctx).unwrap();
        assert_eq!(reloaded.total_study_minutes, 90);
        assert_eq!(reloaded.skills.listening, 5);

        // Other scopes are untouched
        let other = storage.load(&LearnerContext::learner("ben")).unwrap();
        assert_eq!(other.total_study_minutes, 0);
    }
}
