//! Error types for the revroute domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator has its own error enum; [`RouterError`] is what
//! `classify_request` hands back to its caller.

use thiserror::Error;

/// The top-level error type for router operations.
///
/// Malformed classifier output is deliberately absent: it is always recovered
/// into a clarification decision and never reaches the caller.
#[derive(Debug, Error)]
pub enum RouterError {
    // --- External reasoning engine ---
    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(#[from] EngineError),

    // --- Workspace state ---
    #[error("Workspace state unavailable: {0}")]
    StateUnavailable(#[from] StateError),

    // --- Pattern table construction ---
    #[error("Pre-router pattern '{conflicting}' collides with existing pattern '{existing}'")]
    PatternCollision {
        existing: String,
        conflicting: String,
    },

    // --- Configuration ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using [`RouterError`].
pub type Result<T> = std::result::Result<T, RouterError>;

/// Transport and provider failures from a reasoning engine.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Engine not configured: {0}")]
    NotConfigured(String),

    #[error("Engine returned no text")]
    EmptyResponse,
}

/// Failures fetching a workspace state snapshot.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Workspace not found: {0}")]
    NotFound(String),

    #[error("Invalid workspace id: {0}")]
    InvalidWorkspaceId(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed workspace state for {workspace_id}: {reason}")]
    Malformed {
        workspace_id: String,
        reason: String,
    },
}
