//! ReasoningEngine trait: the abstraction over the external LLM used for
//! request classification.
//!
//! The router only needs "prompt in, text out". JSON extraction and schema
//! validation stay on the router side so every backend is interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Sampling parameters for a single engine call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallOptions {
    /// Temperature (0.0 = deterministic)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 {
    500
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: default_max_tokens(),
        }
    }
}

/// The core ReasoningEngine trait.
///
/// Every backend (Anthropic, OpenAI-compatible, test stubs) implements this.
/// Implementations must honour `temperature = 0.0`.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// A human-readable name for this engine (e.g., "anthropic", "openrouter").
    fn name(&self) -> &str;

    /// Send one system + user prompt pair and return the raw completion text.
    async fn call(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CallOptions,
    ) -> std::result::Result<String, EngineError>;
}
