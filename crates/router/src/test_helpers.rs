//! Shared test helpers for router tests.

use async_trait::async_trait;
use revroute_core::engine::{CallOptions, ReasoningEngine};
use revroute_core::error::EngineError;
use revroute_core::workspace::{SkillState, TemplateReadiness, WorkspaceStateIndex};
use std::sync::Mutex;
use std::time::Duration;

/// What the engine was asked.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: CallOptions,
}

/// An engine that returns a sequence of scripted replies.
///
/// Each call returns the next reply; once the script runs out the last reply
/// is repeated.
pub struct ScriptedEngine {
    replies: Vec<Result<String, EngineError>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl ScriptedEngine {
    pub fn new(replies: Vec<Result<String, EngineError>>) -> Self {
        Self {
            replies,
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn replies(replies: Vec<&str>) -> Self {
        Self::new(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn failing(error: EngineError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Sleep before answering (use with a paused tokio clock).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ReasoningEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn call(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CallOptions,
    ) -> Result<String, EngineError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                system_prompt: system_prompt.to_string(),
                user_prompt: user_prompt.to_string(),
                options: *options,
            });
            calls.len() - 1
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .replies
            .get(index)
            .or_else(|| self.replies.last())
            .expect("ScriptedEngine needs at least one reply");
        reply.clone()
    }
}

/// Skill state shorthand: `(has_evidence, is_stale)`.
pub fn skill(has_evidence: bool, is_stale: bool) -> SkillState {
    SkillState {
        has_evidence,
        last_run: None,
        is_stale,
        claim_count: if has_evidence { 3 } else { 0 },
    }
}

/// A snapshot with the given skills and readiness records.
pub fn workspace(
    skills: &[(&str, SkillState)],
    templates: &[(&str, TemplateReadiness)],
) -> WorkspaceStateIndex {
    let mut state = WorkspaceStateIndex::default();
    for (id, s) in skills {
        state.skill_states.insert((*id).to_string(), s.clone());
    }
    for (id, t) in templates {
        state.template_readiness.insert((*id).to_string(), t.clone());
    }
    state
}
