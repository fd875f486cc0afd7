//! # revroute core
//!
//! Domain types, collaborator traits, and error definitions for the revroute
//! request router. This crate performs **no I/O**; it defines the model that
//! the router, the state providers, and the reasoning-engine clients all
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here:
//! - [`StateProvider`] hands out a read-only [`WorkspaceStateIndex`] snapshot
//! - [`ReasoningEngine`] turns a system + user prompt into raw text
//!
//! The router is then a pure function of its inputs plus these two injected
//! collaborators, which keeps it trivially testable against stubs.

pub mod decision;
pub mod engine;
pub mod error;
pub mod workspace;

// Re-export key types at crate root for ergonomics
pub use decision::{EstimatedWait, RequestType, RouterDecision, UiContext};
pub use engine::{CallOptions, ReasoningEngine};
pub use error::{EngineError, Result, RouterError, StateError};
pub use workspace::{
    DataCoverage, SkillState, StateProvider, TemplateReadiness, WorkspaceStateIndex,
};
