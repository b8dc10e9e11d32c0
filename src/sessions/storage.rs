use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::StudySession;
use crate::storage::file_storage::write_json_atomic;
use crate::storage::{DataRoot, LearnerContext, Result, StorageError};

/// Storage for the study-session log (one JSON file per session,
/// partitioned by owner scope)
pub struct SessionLog {
    sessions_dir: PathBuf,
}

impl SessionLog {
    /// Open the session log, creating its directory if needed
    pub fn new(root: &DataRoot) -> Result<Self> {
        let sessions_dir = root.sessions_dir();
        fs::create_dir_all(&sessions_dir).map_err(|e| {
            StorageError::Unavailable(format!(
                "cannot open session log at {}: {}",
                sessions_dir.display(),
                e
            ))
        })?;
        Ok(Self { sessions_dir })
    }

    fn scope_dir(&self, ctx: &LearnerContext) -> PathBuf {
        self.sessions_dir.join(ctx.scope.storage_name())
    }

    fn session_path(&self, ctx: &LearnerContext, id: Uuid) -> PathBuf {
        self.scope_dir(ctx).join(format!("{}.json", id))
    }

    /// Append a completed session to the log. Sessions are immutable,
    /// re-logging an id is rejected.
    pub fn log_session(&self, ctx: &LearnerContext, session: &StudySession) -> Result<()> {
        let dir = self.scope_dir(ctx);
        fs::create_dir_all(&dir)?;

        let path = self.session_path(ctx, session.id);
        if path.exists() {
            return Err(StorageError::InvalidOperation(format!(
                "session {} is already logged",
                session.id
            )));
        }

        write_json_atomic(&path, session)
    }

    /// Load a session by id
    pub fn get_session(&self, ctx: &LearnerContext, id: Uuid) -> Result<StudySession> {
        let path = self.session_path(ctx, id);
        if !path.exists() {
            return Err(StorageError::NotFound(format!("session {}", id)));
        }
        let content = fs::read_to_string(path)?;
        let session: StudySession = serde_json::from_str(&content)?;
        Ok(session)
    }

    /// List all sessions for the scope, most recent start first
    pub fn list_sessions(&self, ctx: &LearnerContext) -> Result<Vec<StudySession>> {
        let dir = self.scope_dir(ctx);
        let mut sessions = Vec::new();

        if !dir.exists() {
            return Ok(sessions);
        }

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                let content = fs::read_to_string(&path)?;
                match serde_json::from_str::<StudySession>(&content) {
                    Ok(session) => sessions.push(session),
                    Err(e) => log::warn!("skipping unreadable session {}: {}", path.display(), e),
                }
            }
        }

        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(sessions)
    }

    /// Sessions whose start falls in `[start, end)`
    pub fn sessions_in_range(
        &self,
        ctx: &LearnerContext,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<StudySession>> {
        Ok(self
            .list_sessions(ctx)?
            .into_iter()
            .filter(|s| s.started_at >= start && s.started_at < end)
            .collect())
    }
}
