//! Deterministic fast path for explicit commands.
//!
//! Matches normalized input against an ordered table of exact and prefix
//! patterns. A hit produces a complete decision without touching the
//! reasoning engine; a miss falls through to full classification.
//!
//! The table is checked at construction: no pattern may be a prefix of (or
//! equal to) another, so first-match order never decides between two
//! overlapping commands.

use revroute_core::decision::{EstimatedWait, RequestType, RouterDecision};
use revroute_core::error::RouterError;
use revroute_core::workspace::WorkspaceStateIndex;
use serde::Serialize;

use crate::catalog::{self, DELIVERABLES, SKILLS};

const SKILL_RUN_CONFIDENCE: f32 = 0.99;
const DELIVERABLE_CONFIDENCE: f32 = 0.95;
const STATUS_CONFIDENCE: f32 = 0.95;

const SKILL_VERBS: &[&str] = &["run", "rerun", "refresh"];
const DELIVERABLE_VERBS: &[&str] = &["build", "generate", "create"];
const DELIVERABLE_ARTICLES: &[&str] = &["me a ", "me an ", "a ", "an ", "the ", ""];
const STATUS_PHRASES: &[&str] = &[
    "status",
    "workspace status",
    "show status",
    "show workspace status",
    "what do you know",
];

/// How a pattern is compared with the normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    /// Matches the pattern alone or followed by a space and more words.
    Prefix,
}

/// Which command family a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    SkillRun,
    DeliverableBuild,
    WorkspaceStatus,
}

/// What a matched pattern routes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternOutcome {
    RunSkill { skill_id: String },
    BuildDeliverable { deliverable_id: String },
    WorkspaceStatus,
}

/// One row of the command table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternEntry {
    pub pattern: String,
    pub match_kind: MatchKind,
    pub family: PatternFamily,
    pub outcome: PatternOutcome,
}

impl PatternEntry {
    pub fn exact(pattern: impl Into<String>, family: PatternFamily, outcome: PatternOutcome) -> Self {
        Self {
            pattern: normalize(&pattern.into()),
            match_kind: MatchKind::Exact,
            family,
            outcome,
        }
    }

    pub fn prefix(pattern: impl Into<String>, family: PatternFamily, outcome: PatternOutcome) -> Self {
        Self {
            pattern: normalize(&pattern.into()),
            match_kind: MatchKind::Prefix,
            family,
            outcome,
        }
    }

    /// `input` must already be normalized.
    fn matches(&self, input: &str) -> bool {
        match self.match_kind {
            MatchKind::Exact => input == self.pattern,
            MatchKind::Prefix => {
                input == self.pattern
                    || input
                        .strip_prefix(self.pattern.as_str())
                        .is_some_and(|rest| rest.starts_with(' '))
            }
        }
    }

    /// Build the full decision this entry stands for.
    pub fn decision(&self, workspace_state: WorkspaceStateIndex) -> RouterDecision {
        match &self.outcome {
            PatternOutcome::RunSkill { skill_id } => {
                let mut d = RouterDecision::new(
                    RequestType::SkillExecution,
                    SKILL_RUN_CONFIDENCE,
                    EstimatedWait::TenToThirtySeconds,
                    workspace_state,
                );
                d.skill_id = Some(skill_id.clone());
                d
            }
            PatternOutcome::BuildDeliverable { deliverable_id } => {
                let mut d = RouterDecision::new(
                    RequestType::DeliverableRequest,
                    DELIVERABLE_CONFIDENCE,
                    EstimatedWait::ThirtyToSixtySeconds,
                    workspace_state,
                );
                d.deliverable_type = Some(deliverable_id.clone());
                d.template_id = Some(deliverable_id.clone());
                d
            }
            PatternOutcome::WorkspaceStatus => {
                let mut d = RouterDecision::new(
                    RequestType::EvidenceInquiry,
                    STATUS_CONFIDENCE,
                    EstimatedWait::UnderOneSecond,
                    workspace_state,
                );
                d.target_metric = Some("workspace_status".into());
                d
            }
        }
    }
}

/// Lower-case, trim, collapse runs of whitespace, and drop trailing `?!.`.
pub fn normalize(input: &str) -> String {
    let collapsed = input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed
        .trim_end_matches(['?', '!', '.'])
        .trim_end()
        .to_string()
}

/// The deterministic command matcher.
#[derive(Debug, Clone)]
pub struct PreRouter {
    entries: Vec<PatternEntry>,
}

impl PreRouter {
    /// The built-in table, generated from the skill and deliverable catalogue.
    pub fn standard() -> Result<Self, RouterError> {
        Self::with_entries(standard_entries())
    }

    /// Build from a custom table. Fails if any two patterns overlap.
    pub fn with_entries(entries: Vec<PatternEntry>) -> Result<Self, RouterError> {
        for (i, a) in entries.iter().enumerate() {
            if a.pattern.is_empty() {
                return Err(RouterError::Config {
                    message: "pre-router pattern must not be empty".into(),
                });
            }
            for b in &entries[i + 1..] {
                let (shorter, longer) = if a.pattern.len() <= b.pattern.len() {
                    (a, b)
                } else {
                    (b, a)
                };
                if longer.pattern.starts_with(shorter.pattern.as_str()) {
                    return Err(RouterError::PatternCollision {
                        existing: a.pattern.clone(),
                        conflicting: b.pattern.clone(),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// First matching entry for the raw user input, if any.
    pub fn route(&self, user_input: &str) -> Option<&PatternEntry> {
        let normalized = normalize(user_input);
        if normalized.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| e.matches(&normalized))
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }
}

fn standard_entries() -> Vec<PatternEntry> {
    let mut entries = Vec::new();

    for skill_id in SKILLS {
        let outcome = PatternOutcome::RunSkill {
            skill_id: (*skill_id).to_string(),
        };
        for verb in SKILL_VERBS {
            for name in [catalog::skill_phrase(skill_id), (*skill_id).to_string()] {
                entries.push(PatternEntry::prefix(
                    format!("{verb} {name}"),
                    PatternFamily::SkillRun,
                    outcome.clone(),
                ));
            }
        }
    }

    for deliverable_id in DELIVERABLES {
        let outcome = PatternOutcome::BuildDeliverable {
            deliverable_id: (*deliverable_id).to_string(),
        };
        let label = catalog::deliverable_label(deliverable_id);
        for verb in DELIVERABLE_VERBS {
            for article in DELIVERABLE_ARTICLES {
                entries.push(PatternEntry::prefix(
                    format!("{verb} {article}{label}"),
                    PatternFamily::DeliverableBuild,
                    outcome.clone(),
                ));
            }
        }
    }

    for phrase in STATUS_PHRASES {
        entries.push(PatternEntry::exact(
            *phrase,
            PatternFamily::WorkspaceStatus,
            PatternOutcome::WorkspaceStatus,
        ));
    }

    entries
}
