//! Reasoning-engine implementations for revroute.
//!
//! All engines implement the `revroute_core::ReasoningEngine` trait.
//! [`build_from_config`] picks the one the classifier section asks for.

pub mod anthropic;
pub mod factory;
pub mod openai_compat;

pub use anthropic::AnthropicEngine;
pub use factory::build_from_config;
pub use openai_compat::OpenAiCompatEngine;
