//! Configuration loading, validation, and management for revroute.
//!
//! Loads configuration from `~/.revroute/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use revroute_core::CallOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Upper bound on classifier output; the expected answer is a short JSON label.
pub const MAX_CLASSIFIER_TOKENS: u32 = 4096;

/// The root configuration structure.
///
/// Maps directly to `~/.revroute/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Fallback API key when a provider section does not set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Classifier call settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Context digest settings
    #[serde(default)]
    pub digest: DigestConfig,

    /// Workspace state snapshot settings
    #[serde(default)]
    pub state: StateConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("api_key", &redact(&self.api_key))
            .field("classifier", &self.classifier)
            .field("providers", &self.providers)
            .field("digest", &self.digest)
            .field("state", &self.state)
            .finish()
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Which provider section backs the classifier
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Hard ceiling on a single classifier call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "anthropic".into()
}
fn default_model() -> String {
    "claude-3-5-haiku-latest".into()
}
fn default_max_tokens() -> u32 {
    500
}
fn default_timeout_secs() -> u64 {
    20
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClassifierConfig {
    /// Sampling parameters for the engine call.
    pub fn call_options(&self) -> CallOptions {
        CallOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Thread context beyond this many characters is cut off
    #[serde(default = "default_max_thread_context_chars")]
    pub max_thread_context_chars: usize,
}

fn default_max_thread_context_chars() -> usize {
    1000
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            max_thread_context_chars: default_max_thread_context_chars(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory holding `<workspace_id>.json` snapshots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,
}

impl StateConfig {
    /// The configured snapshot directory, or `~/.revroute/workspaces`.
    pub fn snapshot_dir(&self) -> PathBuf {
        self.snapshot_dir
            .clone()
            .unwrap_or_else(|| RouterConfig::config_dir().join("workspaces"))
    }
}

impl RouterConfig {
    /// Load configuration from the default path (~/.revroute/config.toml).
    ///
    /// Also checks environment variables:
    /// - `REVROUTE_API_KEY` (highest priority), then `ANTHROPIC_API_KEY`,
    ///   then `OPENAI_API_KEY`
    /// - `REVROUTE_PROVIDER`, `REVROUTE_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load from a path, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("REVROUTE_API_KEY")
                .ok()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(provider) = std::env::var("REVROUTE_PROVIDER") {
            config.classifier.provider = provider;
        }

        if let Ok(model) = std::env::var("REVROUTE_MODEL") {
            config.classifier.model = model;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".revroute")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.classifier;
        if !(0.0..=1.0).contains(&c.temperature) {
            return Err(ConfigError::ValidationError(
                "classifier.temperature must be between 0.0 and 1.0".into(),
            ));
        }

        if c.max_tokens == 0 || c.max_tokens > MAX_CLASSIFIER_TOKENS {
            return Err(ConfigError::ValidationError(format!(
                "classifier.max_tokens must be between 1 and {MAX_CLASSIFIER_TOKENS}"
            )));
        }

        if c.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "classifier.timeout_secs must be > 0".into(),
            ));
        }

        if c.provider.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "classifier.provider must not be empty".into(),
            ));
        }

        if self.digest.max_thread_context_chars == 0 {
            return Err(ConfigError::ValidationError(
                "digest.max_thread_context_chars must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// API key for a provider: its own section first, then the global key.
    pub fn api_key_for(&self, provider: &str) -> Option<String> {
        self.providers
            .get(provider)
            .and_then(|p| p.api_key.clone())
            .or_else(|| self.api_key.clone())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            classifier: ClassifierConfig::default(),
            providers: HashMap::new(),
            digest: DigestConfig::default(),
            state: StateConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
