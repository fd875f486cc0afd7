//! Compact digest of workspace evidence for the classifier prompt.
//!
//! Both skill lists are always rendered, with an explicit `none` when empty.
//! Leaving a list out invites the classifier to invent skill ids.

use chrono::{DateTime, Utc};
use revroute_core::decision::UiContext;
use revroute_core::workspace::WorkspaceStateIndex;
use std::fmt::Write;

use crate::presentation::{format_skill_name, relative_time};

const NONE: &str = "none";

/// Renders a [`WorkspaceStateIndex`] (plus optional UI context) as text.
#[derive(Debug, Clone)]
pub struct ContextSummarizer {
    max_thread_context_chars: usize,
}

impl Default for ContextSummarizer {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl ContextSummarizer {
    pub fn new(max_thread_context_chars: usize) -> Self {
        Self {
            max_thread_context_chars,
        }
    }

    /// Build the digest. `now` anchors the relative ages.
    pub fn summarize(
        &self,
        state: &WorkspaceStateIndex,
        context: Option<&UiContext>,
        now: DateTime<Utc>,
    ) -> String {
        let mut out = String::new();
        let coverage = &state.data_coverage;

        let _ = writeln!(
            out,
            "CRM: {} | Deals: {} total ({} closed-won, {} closed-lost)",
            coverage.crm_type.as_deref().unwrap_or("not connected"),
            coverage.deals_total,
            coverage.deals_closed_won,
            coverage.deals_closed_lost,
        );

        let mut with_evidence = state.skills_with_evidence().peekable();
        if with_evidence.peek().is_none() {
            let _ = writeln!(out, "Skills with evidence: {NONE}");
        } else {
            let _ = writeln!(out, "Skills with evidence:");
            for (skill_id, skill) in with_evidence {
                let age = skill
                    .last_run
                    .map(|ts| relative_time(ts, now))
                    .unwrap_or_else(|| "run time unknown".into());
                let stale = if skill.is_stale { ", STALE" } else { "" };
                let _ = writeln!(
                    out,
                    "- {} ({skill_id}): {age}, {} findings{stale}",
                    format_skill_name(skill_id),
                    skill.claim_count,
                );
            }
        }

        let without: Vec<&str> = state.skills_without_evidence().collect();
        let without = if without.is_empty() {
            NONE.to_string()
        } else {
            without.join(", ")
        };
        let _ = writeln!(out, "Skills without evidence: {without}");

        if let Some(ctx) = context {
            if let Some(scope_type) = ctx.scope_type.as_deref() {
                match ctx.scope_entity.as_deref() {
                    Some(entity) => {
                        let _ = writeln!(out, "Current UI scope: {scope_type} \"{entity}\"");
                    }
                    None => {
                        let _ = writeln!(out, "Current UI scope: {scope_type}");
                    }
                }
            }
            if let Some(source) = ctx.source.as_deref() {
                let _ = writeln!(out, "Request source: {source}");
            }
            if let Some(thread) = ctx.thread_context.as_deref().map(str::trim)
                && !thread.is_empty()
            {
                let _ = writeln!(
                    out,
                    "Thread context: {}",
                    truncate_chars(thread, self.max_thread_context_chars)
                );
            }
        }

        out.trim_end().to_string()
    }
}

/// Cut to at most `max` characters, marking the cut with `…`.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
