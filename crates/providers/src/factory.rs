//! Engine construction from configuration.

use revroute_config::{ConfigError, RouterConfig};
use revroute_core::engine::ReasoningEngine;
use std::sync::Arc;
use tracing::debug;

use crate::anthropic::AnthropicEngine;
use crate::openai_compat::OpenAiCompatEngine;

/// Build the engine named by `classifier.provider`.
///
/// `anthropic` uses the native Messages API; every other name is treated as
/// an OpenAI-compatible endpoint, with well-known base URLs filled in.
pub fn build_from_config(config: &RouterConfig) -> Result<Arc<dyn ReasoningEngine>, ConfigError> {
    let name = config.classifier.provider.as_str();
    let model = config.classifier.model.clone();
    let api_url = config.providers.get(name).and_then(|p| p.api_url.clone());
    let api_key = config.api_key_for(name).unwrap_or_default();

    if api_key.is_empty() && name != "ollama" {
        debug!(provider = name, "No API key configured; calls will fail until one is set");
    }

    let engine: Arc<dyn ReasoningEngine> = if name == "anthropic" {
        let mut engine = AnthropicEngine::new(api_key).with_model(model);
        if let Some(url) = api_url {
            engine = engine.with_base_url(url);
        }
        Arc::new(engine)
    } else {
        let base_url = match api_url {
            Some(url) => url,
            None => default_base_url(name).ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "provider '{name}' has no api_url and no known default"
                ))
            })?,
        };
        Arc::new(OpenAiCompatEngine::new(name, base_url, api_key, model))
    };

    Ok(engine)
}

/// Get the default base URL for well-known OpenAI-compatible providers.
fn default_base_url(provider_name: &str) -> Option<String> {
    let url = match provider_name {
        "openrouter" => "https://openrouter.ai/api/v1",
        "openai" => "https://api.openai.com/v1",
        "ollama" => "http://localhost:11434/v1",
        "deepseek" => "https://api.deepseek.com/v1",
        "groq" => "https://api.groq.com/openai/v1",
        "together" => "https://api.together.xyz/v1",
        "vllm" => "http://localhost:8000/v1",
        _ => return None,
    };
    Some(url.into())
}
