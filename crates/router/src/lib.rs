//! Request classification and freshness-aware dispatch.
//!
//! Every request flows through the same pipeline:
//!
//! 1. **Fetch** the workspace state snapshot
//! 2. **Pre-route** exact commands ("run pipeline hygiene", "status") without the engine
//! 3. **Summarize** the snapshot into a compact digest
//! 4. **Classify** with the reasoning engine into one of four request types
//! 5. **Resolve freshness**: stale skills, template readiness, wait estimate
//! 6. **Merge** the caller's UI scope onto decisions that lack one
//!
//! The result is a [`RouterDecision`](revroute_core::RouterDecision).

pub mod catalog;
pub mod classifier;
pub mod freshness;
pub mod pre_router;
pub mod presentation;
pub mod router;
pub mod scope;
pub mod summarizer;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classifier::{Classification, ClassificationParseError, Classifier};
pub use freshness::FreshnessResolver;
pub use pre_router::{MatchKind, PatternEntry, PatternFamily, PatternOutcome, PreRouter};
pub use presentation::{format_skill_name, relative_time};
pub use router::Router;
pub use scope::{ScopeType, infer_skills, merge_ui_context};
pub use summarizer::ContextSummarizer;
