//! Workspace evidence state: the read-only snapshot the router consults.
//!
//! A [`WorkspaceStateIndex`] is fetched once per routing call through a
//! [`StateProvider`] and never cached inside the router, so a decision is
//! always made against the freshness flags of that moment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StateError;

/// Evidence status of a single skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillState {
    #[serde(default)]
    pub has_evidence: bool,

    /// When the skill last produced evidence.
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,

    /// Set by the evidence store when the run exceeds the workspace
    /// freshness threshold.
    #[serde(default)]
    pub is_stale: bool,

    /// Number of claims (findings) in the latest evidence.
    #[serde(default)]
    pub claim_count: u32,
}

/// What the connected CRM holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCoverage {
    #[serde(default)]
    pub crm_type: Option<String>,
    #[serde(default)]
    pub deals_total: u64,
    #[serde(default)]
    pub deals_closed_won: u64,
    #[serde(default)]
    pub deals_closed_lost: u64,
}

/// Whether a deliverable template can be generated right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateReadiness {
    pub ready: bool,

    /// Human-readable explanation, shown verbatim when not ready.
    #[serde(default)]
    pub reason: String,

    /// Skills whose evidence must be refreshed first, in run order.
    #[serde(default)]
    pub stale_skills: Vec<String>,
}

/// Snapshot of a workspace's evidence freshness and template readiness.
///
/// Maps are ordered so that digests built from a snapshot are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceStateIndex {
    #[serde(default)]
    pub skill_states: BTreeMap<String, SkillState>,

    #[serde(default)]
    pub data_coverage: DataCoverage,

    #[serde(default)]
    pub template_readiness: BTreeMap<String, TemplateReadiness>,
}

impl WorkspaceStateIndex {
    /// Look up a skill's state.
    pub fn skill(&self, skill_id: &str) -> Option<&SkillState> {
        self.skill_states.get(skill_id)
    }

    /// A skill absent from the index has no evidence.
    pub fn has_evidence(&self, skill_id: &str) -> bool {
        self.skill(skill_id).is_some_and(|s| s.has_evidence)
    }

    /// A skill absent from the index is not stale (there is nothing to refresh).
    pub fn is_stale(&self, skill_id: &str) -> bool {
        self.skill(skill_id).is_some_and(|s| s.is_stale)
    }

    /// Look up a deliverable's readiness record.
    pub fn readiness(&self, deliverable_id: &str) -> Option<&TemplateReadiness> {
        self.template_readiness.get(deliverable_id)
    }

    /// Skills that have evidence, in id order.
    pub fn skills_with_evidence(&self) -> impl Iterator<Item = (&str, &SkillState)> {
        self.skill_states
            .iter()
            .filter(|(_, s)| s.has_evidence)
            .map(|(id, s)| (id.as_str(), s))
    }

    /// Skills known to the workspace that have never produced evidence.
    pub fn skills_without_evidence(&self) -> impl Iterator<Item = &str> {
        self.skill_states
            .iter()
            .filter(|(_, s)| !s.has_evidence)
            .map(|(id, _)| id.as_str())
    }
}

/// Read-only source of workspace state snapshots.
///
/// Implementations must return promptly; the router awaits this before any
/// classification work.
#[async_trait]
pub trait StateProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "in_memory", "file").
    fn name(&self) -> &str;

    /// Fetch the current snapshot for a workspace.
    async fn workspace_state(
        &self,
        workspace_id: &str,
    ) -> std::result::Result<WorkspaceStateIndex, StateError>;
}
