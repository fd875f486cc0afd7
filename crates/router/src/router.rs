//! The classification entry point.

use chrono::Utc;
use revroute_config::RouterConfig;
use revroute_core::decision::{RouterDecision, UiContext};
use revroute_core::engine::ReasoningEngine;
use revroute_core::error::RouterError;
use revroute_core::workspace::StateProvider;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span};

use crate::classifier::Classifier;
use crate::freshness::FreshnessResolver;
use crate::pre_router::PreRouter;
use crate::scope::merge_ui_context;
use crate::summarizer::ContextSummarizer;

/// Sequences pre-routing, summarizing, classification, freshness resolution
/// and the UI-context merge for one request at a time.
///
/// Holds no per-request state; a single `Router` can serve concurrent calls.
pub struct Router {
    state: Arc<dyn StateProvider>,
    classifier: Classifier,
    pre_router: PreRouter,
    summarizer: ContextSummarizer,
}

impl Router {
    /// Build with the standard pattern table and default classifier settings.
    pub fn new(
        state: Arc<dyn StateProvider>,
        engine: Arc<dyn ReasoningEngine>,
    ) -> Result<Self, RouterError> {
        Ok(Self {
            state,
            classifier: Classifier::new(engine),
            pre_router: PreRouter::standard()?,
            summarizer: ContextSummarizer::default(),
        })
    }

    /// Build with classifier and digest settings taken from config.
    pub fn from_config(
        state: Arc<dyn StateProvider>,
        engine: Arc<dyn ReasoningEngine>,
        config: &RouterConfig,
    ) -> Result<Self, RouterError> {
        config.validate().map_err(|e| RouterError::Config {
            message: e.to_string(),
        })?;

        let classifier = Classifier::new(engine)
            .with_options(config.classifier.call_options())
            .with_timeout(config.classifier.timeout());

        Ok(Self {
            state,
            classifier,
            pre_router: PreRouter::standard()?,
            summarizer: ContextSummarizer::new(config.digest.max_thread_context_chars),
        })
    }

    /// Replace the pattern table.
    pub fn with_pre_router(mut self, pre_router: PreRouter) -> Self {
        self.pre_router = pre_router;
        self
    }

    pub fn pre_router(&self) -> &PreRouter {
        &self.pre_router
    }

    /// Classify one user request against the workspace's current state.
    ///
    /// Pattern matches return without calling the engine. Malformed engine
    /// output comes back as a clarification decision, not an error. Errors
    /// are limited to an unreachable state provider or engine; neither is
    /// retried here.
    pub async fn classify_request(
        &self,
        workspace_id: &str,
        user_input: &str,
        context: Option<&UiContext>,
    ) -> Result<RouterDecision, RouterError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = info_span!("classify_request", %workspace_id, %request_id);
        self.route(workspace_id, user_input, context)
            .instrument(span)
            .await
    }

    async fn route(
        &self,
        workspace_id: &str,
        user_input: &str,
        context: Option<&UiContext>,
    ) -> Result<RouterDecision, RouterError> {
        let state = self.state.workspace_state(workspace_id).await?;

        if let Some(entry) = self.pre_router.route(user_input) {
            info!(pattern = %entry.pattern, family = ?entry.family, "Pre-routed request");
            return Ok(entry.decision(state));
        }

        let digest = self.summarizer.summarize(&state, context, Utc::now());
        debug!(
            provider = self.state.name(),
            engine = self.classifier.engine_name(),
            digest_chars = digest.len(),
            "Classifying with engine"
        );

        let first_pass = self.classifier.classify(user_input, &digest).await?;
        let decision = FreshnessResolver::resolve(&first_pass, state);
        let decision = merge_ui_context(decision, context);

        info!(
            request_type = %decision.request_type,
            confidence = decision.confidence,
            needs_clarification = decision.needs_clarification,
            stale = decision.stale_skills_to_rerun.len(),
            "Request classified"
        );

        Ok(decision)
    }
}
