//! The router's output: a single, fully-resolved routing decision.

use serde::{Deserialize, Serialize};

use crate::workspace::WorkspaceStateIndex;

/// The four execution paths a request can take. Exactly one per decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Read existing evidence ("what did hygiene find?").
    EvidenceInquiry,
    /// Reason over evidence for a deal, rep, segment, etc.
    ScopedAnalysis,
    /// Build a report/document template.
    DeliverableRequest,
    /// Run a skill now.
    SkillExecution,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EvidenceInquiry => "evidence_inquiry",
            Self::ScopedAnalysis => "scoped_analysis",
            Self::DeliverableRequest => "deliverable_request",
            Self::SkillExecution => "skill_execution",
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable wait buckets shown to the user before work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstimatedWait {
    #[serde(rename = "< 1 second")]
    UnderOneSecond,
    #[serde(rename = "3-5 seconds")]
    ThreeToFiveSeconds,
    #[serde(rename = "10-30 seconds")]
    TenToThirtySeconds,
    #[serde(rename = "30-60 seconds")]
    ThirtyToSixtySeconds,
}

impl EstimatedWait {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderOneSecond => "< 1 second",
            Self::ThreeToFiveSeconds => "3-5 seconds",
            Self::TenToThirtySeconds => "10-30 seconds",
            Self::ThirtyToSixtySeconds => "30-60 seconds",
        }
    }
}

impl std::fmt::Display for EstimatedWait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional context supplied by the calling surface (web UI, Slack thread).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_entity: Option<String>,
    /// Where the request came from (e.g., "slack", "web").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Recent conversation text for follow-up questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_context: Option<String>,
}

/// A routing decision. Built once per call and handed to the caller.
///
/// Invariants upheld by the router:
/// - `needs_clarification` implies a non-empty `clarification_question`
/// - `stale_skills_to_rerun` is only non-empty for scoped analyses and
///   deliverable requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterDecision {
    #[serde(rename = "type")]
    pub request_type: RequestType,

    /// In [0, 1]. Pre-routed commands are always >= 0.95.
    pub confidence: f32,

    // evidence_inquiry
    pub target_skill: Option<String>,
    pub target_metric: Option<String>,

    // scoped_analysis
    pub scope_type: Option<String>,
    pub scope_entity: Option<String>,
    pub scope_question: Option<String>,
    pub skills_to_consult: Option<Vec<String>>,

    // deliverable_request
    pub deliverable_type: Option<String>,
    pub template_id: Option<String>,

    // skill_execution
    pub skill_id: Option<String>,
    pub skill_params: Option<serde_json::Map<String, serde_json::Value>>,

    pub needs_clarification: bool,
    pub clarification_question: Option<String>,

    /// Skills to recompute before answering, in run order, without duplicates.
    pub stale_skills_to_rerun: Vec<String>,

    pub estimated_wait: EstimatedWait,

    /// The snapshot this decision was made against.
    pub workspace_state: WorkspaceStateIndex,
}

impl RouterDecision {
    /// A decision of the given type with every optional field unset.
    pub fn new(
        request_type: RequestType,
        confidence: f32,
        estimated_wait: EstimatedWait,
        workspace_state: WorkspaceStateIndex,
    ) -> Self {
        Self {
            request_type,
            confidence: confidence.clamp(0.0, 1.0),
            target_skill: None,
            target_metric: None,
            scope_type: None,
            scope_entity: None,
            scope_question: None,
            skills_to_consult: None,
            deliverable_type: None,
            template_id: None,
            skill_id: None,
            skill_params: None,
            needs_clarification: false,
            clarification_question: None,
            stale_skills_to_rerun: Vec::new(),
            estimated_wait,
            workspace_state,
        }
    }

    /// Whether the router wants the user to answer before acting.
    pub fn is_clarifying(&self) -> bool {
        self.needs_clarification
            && self
                .clarification_question
                .as_deref()
                .is_some_and(|q| !q.trim().is_empty())
    }
}
