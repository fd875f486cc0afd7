//! LLM-backed request classification.
//!
//! Sends the fixed instruction plus a workspace digest to the reasoning
//! engine and turns its reply into a first-pass [`Classification`].
//!
//! Two failure modes are handled differently:
//! - the engine is unreachable or errors: surfaced as [`EngineError`]
//! - the engine answers with garbage: recovered into
//!   [`Classification::fallback`], a low-confidence clarification

pub mod parse;
pub mod prompt;

use revroute_core::decision::RequestType;
use revroute_core::engine::{CallOptions, ReasoningEngine};
use revroute_core::error::EngineError;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub use parse::{ClassificationParseError, extract_json, parse_classification};

const FALLBACK_CONFIDENCE: f32 = 0.3;
const FALLBACK_QUESTION: &str = "I didn't quite catch that. Could you rephrase your question, \
     for example naming the deal, rep, or report you're interested in?";

/// The classifier's first-pass answer, before any freshness resolution.
///
/// Never mutated after parsing; the freshness resolver derives a separate
/// decision from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub confidence: f32,
    pub target_skill: Option<String>,
    pub target_metric: Option<String>,
    pub scope_type: Option<String>,
    pub scope_entity: Option<String>,
    pub scope_question: Option<String>,
    pub skills_to_consult: Option<Vec<String>>,
    pub deliverable_type: Option<String>,
    pub template_id: Option<String>,
    pub skill_id: Option<String>,
    pub skill_params: Option<serde_json::Map<String, serde_json::Value>>,
    pub needs_clarification: bool,
    pub clarification_question: Option<String>,
}

impl Classification {
    /// A bare classification of the given type with nothing else set.
    pub fn of_type(request_type: RequestType, confidence: f32) -> Self {
        Self {
            request_type,
            confidence,
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
        }
    }

    /// What the router falls back to when the engine's output is unusable.
    pub fn fallback(user_input: &str) -> Self {
        Self {
            scope_question: Some(user_input.to_string()),
            needs_clarification: true,
            clarification_question: Some(FALLBACK_QUESTION.into()),
            ..Self::of_type(RequestType::ScopedAnalysis, FALLBACK_CONFIDENCE)
        }
    }
}

/// Calls the reasoning engine with deterministic, token-bounded settings.
pub struct Classifier {
    engine: Arc<dyn ReasoningEngine>,
    options: CallOptions,
    timeout: Duration,
    system_prompt: String,
}

impl Classifier {
    pub fn new(engine: Arc<dyn ReasoningEngine>) -> Self {
        Self {
            engine,
            options: CallOptions::default(),
            timeout: Duration::from_secs(20),
            system_prompt: prompt::system_prompt(),
        }
    }

    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    /// Ceiling on a single engine call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Classify one request. Never retries.
    ///
    /// Returns `Err` only for transport/provider failures (including the
    /// timeout). Malformed or empty output yields [`Classification::fallback`].
    pub async fn classify(
        &self,
        user_input: &str,
        digest: &str,
    ) -> Result<Classification, EngineError> {
        let user_prompt = prompt::user_prompt(digest, user_input);

        let call = self
            .engine
            .call(&self.system_prompt, &user_prompt, &self.options);
        let raw = match tokio::time::timeout(self.timeout, call).await {
            Ok(Err(EngineError::EmptyResponse)) => {
                warn!(engine = self.engine.name(), "Empty engine reply, falling back to clarification");
                return Ok(Classification::fallback(user_input));
            }
            Ok(result) => result?,
            Err(_) => {
                return Err(EngineError::Timeout(format!(
                    "{} did not answer within {}s",
                    self.engine.name(),
                    self.timeout.as_secs_f32()
                )));
            }
        };

        debug!(engine = self.engine.name(), raw = %raw, "Classifier output");

        match parse_classification(&raw) {
            Ok(classification) => Ok(classification),
            Err(e) => {
                warn!(engine = self.engine.name(), error = %e, "Falling back to clarification");
                Ok(Classification::fallback(user_input))
            }
        }
    }
}
