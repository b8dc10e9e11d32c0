use serde::{Deserialize, Serialize};

/// Partition key separating one learner's private items from the
/// globally shared seed corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OwnerScope {
    /// Shared items, visible to every learner
    Global,
    /// Items private to a single learner
    Learner { id: String },
}

impl OwnerScope {
    pub fn learner(id: impl Into<String>) -> Self {
        Self::Learner { id: id.into() }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }

    /// Stable directory/file stem for this scope. Learner ids are
    /// opaque tokens from the authentication layer and must already be
    /// filesystem safe.
    pub fn storage_name(&self) -> String {
        match self {
            Self::Global => "global".to_string(),
            Self::Learner { id } => format!("learner-{}", id),
        }
    }
}

/// Explicit per-call context carrying the owner scope. Passed to every
/// store and analytics operation instead of any module-level notion of
/// a "current user", so multiple learner scopes can coexist in one
/// process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerContext {
    pub scope: OwnerScope,
}

impl LearnerContext {
    pub fn global() -> Self {
        Self {
            scope: OwnerScope::Global,
        }
    }

    pub fn learner(id: impl Into<String>) -> Self {
        Self {
            scope: OwnerScope::learner(id),
        }
    }
}
