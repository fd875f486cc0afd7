//! In-memory provider, useful for testing and for embedding the router next
//! to a service that already holds state in process.

use async_trait::async_trait;
use revroute_core::error::StateError;
use revroute_core::workspace::{StateProvider, WorkspaceStateIndex};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds one snapshot per workspace. Every read returns a clone so callers
/// can never mutate the stored state through a decision.
#[derive(Clone, Default)]
pub struct InMemoryStateProvider {
    workspaces: Arc<RwLock<HashMap<String, WorkspaceStateIndex>>>,
}

impl InMemoryStateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider seeded with a single workspace.
    pub fn with_workspace(workspace_id: impl Into<String>, state: WorkspaceStateIndex) -> Self {
        let mut map = HashMap::new();
        map.insert(workspace_id.into(), state);
        Self {
            workspaces: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a workspace snapshot.
    pub async fn insert(&self, workspace_id: impl Into<String>, state: WorkspaceStateIndex) {
        self.workspaces.write().await.insert(workspace_id.into(), state);
    }

    pub async fn remove(&self, workspace_id: &str) -> Option<WorkspaceStateIndex> {
        self.workspaces.write().await.remove(workspace_id)
    }
}

#[async_trait]
impl StateProvider for InMemoryStateProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn workspace_state(&self, workspace_id: &str) -> Result<WorkspaceStateIndex, StateError> {
        self.workspaces
            .read()
            .await
            .get(workspace_id)
            .cloned()
            .ok_or_else(|| StateError::NotFound(workspace_id.to_string()))
    }
}
