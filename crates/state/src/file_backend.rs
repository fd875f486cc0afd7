//! File-based provider: one JSON snapshot per workspace.
//!
//! Layout: `<dir>/<workspace_id>.json`, each file a serialized
//! `WorkspaceStateIndex`. The evidence pipeline rewrites these files; this
//! provider re-reads on every call so freshness flags are never stale here.

use async_trait::async_trait;
use revroute_core::error::StateError;
use revroute_core::workspace::{StateProvider, WorkspaceStateIndex};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads workspace snapshots from a directory of JSON files.
pub struct FileStateProvider {
    dir: PathBuf,
}

impl FileStateProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a workspace's snapshot. Rejects ids that could escape `dir`.
    pub fn snapshot_path(&self, workspace_id: &str) -> Result<PathBuf, StateError> {
        let invalid = workspace_id.is_empty()
            || workspace_id.contains(['/', '\\'])
            || workspace_id.contains("..")
            || workspace_id.starts_with('.');
        if invalid {
            return Err(StateError::InvalidWorkspaceId(workspace_id.to_string()));
        }
        Ok(self.dir.join(format!("{workspace_id}.json")))
    }
}

#[async_trait]
impl StateProvider for FileStateProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn workspace_state(&self, workspace_id: &str) -> Result<WorkspaceStateIndex, StateError> {
        let path = self.snapshot_path(workspace_id)?;

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StateError::NotFound(workspace_id.to_string())
            } else {
                StateError::Storage(format!("Failed to read {}: {e}", path.display()))
            }
        })?;

        let state: WorkspaceStateIndex =
            serde_json::from_str(&content).map_err(|e| StateError::Malformed {
                workspace_id: workspace_id.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            workspace_id,
            skills = state.skill_states.len(),
            templates = state.template_readiness.len(),
            "Loaded workspace snapshot"
        );
        Ok(state)
    }
}
