//! `revroute classify`: Classify one request.

use revroute_config::RouterConfig;
use revroute_core::decision::UiContext;
use revroute_router::Router;
use revroute_state::FileStateProvider;
use std::path::PathBuf;
use std::sync::Arc;

pub struct ClassifyArgs {
    pub workspace: String,
    pub state_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub text: String,
    pub context: Option<UiContext>,
}

/// `None` when no UI flag was given.
pub fn ui_context(
    scope_type: Option<String>,
    scope_entity: Option<String>,
    source: Option<String>,
    thread_context: Option<String>,
) -> Option<UiContext> {
    let ctx = UiContext {
        scope_type,
        scope_entity,
        source,
        thread_context,
    };
    (ctx != UiContext::default()).then_some(ctx)
}

pub async fn run(args: ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => RouterConfig::load_with_env(path),
        None => RouterConfig::load(),
    }
    .map_err(|e| format!("Failed to load config: {e}"))?;

    let state_dir = args
        .state_dir
        .clone()
        .unwrap_or_else(|| config.state.snapshot_dir());
    tracing::debug!(dir = %state_dir.display(), "Using snapshot directory");

    let state = Arc::new(FileStateProvider::new(state_dir));
    let engine = revroute_providers::factory::build_from_config(&config)
        .map_err(|e| format!("Failed to set up reasoning engine: {e}"))?;
    let router = Router::from_config(state, engine, &config)?;

    let decision = router
        .classify_request(&args.workspace, &args.text, args.context.as_ref())
        .await?;

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
