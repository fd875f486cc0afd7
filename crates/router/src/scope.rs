//! Scope categories, their default skill sets, and the UI-context merge.

use revroute_core::decision::{RouterDecision, UiContext};
use std::str::FromStr;

/// What a scoped analysis is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeType {
    Deal,
    Account,
    Rep,
    Pipeline,
    Forecast,
    Segment,
    TimeRange,
}

impl FromStr for ScopeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deal" => Ok(Self::Deal),
            "account" => Ok(Self::Account),
            "rep" => Ok(Self::Rep),
            "pipeline" => Ok(Self::Pipeline),
            "forecast" => Ok(Self::Forecast),
            "segment" => Ok(Self::Segment),
            "time_range" => Ok(Self::TimeRange),
            other => Err(format!("unknown scope type: {other}")),
        }
    }
}

impl ScopeType {
    /// Skills whose evidence a question about this scope draws on.
    pub fn default_skills(&self) -> &'static [&'static str] {
        match self {
            Self::Deal => &["pipeline-hygiene", "single-thread-alert"],
            Self::Account => &["single-thread-alert", "icp-discovery"],
            Self::Rep => &["pipeline-coverage", "pipeline-hygiene", "rep-scorecard"],
            Self::Pipeline => &[
                "pipeline-hygiene",
                "pipeline-coverage",
                "pipeline-waterfall",
                "forecast-rollup",
            ],
            Self::Forecast => &["forecast-rollup", "pipeline-hygiene", "pipeline-coverage"],
            Self::Segment => &["icp-discovery", "pipeline-hygiene"],
            Self::TimeRange => &["pipeline-hygiene", "pipeline-waterfall"],
        }
    }
}

/// Used when the scope type is missing or unrecognised.
pub const FALLBACK_SKILLS: &[&str] = &["pipeline-hygiene"];

/// Skills to consult for a scope type string as the classifier reported it.
pub fn infer_skills(scope_type: Option<&str>) -> Vec<String> {
    let skills = scope_type
        .and_then(|s| s.parse::<ScopeType>().ok())
        .map(|scope| scope.default_skills())
        .unwrap_or(FALLBACK_SKILLS);
    skills.iter().map(|s| (*s).to_string()).collect()
}

/// Copy the caller's UI scope onto a decision that has none.
///
/// Runs after freshness resolution and does not recompute staleness, so
/// `stale_skills_to_rerun` keeps reflecting the scope the classifier chose.
pub fn merge_ui_context(mut decision: RouterDecision, context: Option<&UiContext>) -> RouterDecision {
    let Some(ctx) = context else {
        return decision;
    };

    if decision.scope_type.is_none()
        && let Some(scope_type) = ctx.scope_type.clone()
    {
        decision.scope_type = Some(scope_type);
        if let Some(entity) = ctx.scope_entity.clone() {
            decision.scope_entity = Some(entity);
        }
    }

    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use revroute_core::decision::{EstimatedWait, RequestType};
    use revroute_core::workspace::WorkspaceStateIndex;

    fn decision() -> RouterDecision {
        RouterDecision::new(
            RequestType::ScopedAnalysis,
            0.8,
            EstimatedWait::ThreeToFiveSeconds,
            WorkspaceStateIndex::default(),
        )
    }

    #[test]
    fn parses_scope_types() {
        assert_eq!("deal".parse::<ScopeType>(), Ok(ScopeType::Deal));
        assert_eq!(" Time_Range ".parse::<ScopeType>(), Ok(ScopeType::TimeRange));
        assert!("territory".parse::<ScopeType>().is_err());
    }

    #[test]
    fn scope_table() {
        assert_eq!(infer_skills(Some("deal")), vec!["pipeline-hygiene", "single-thread-alert"]);
        assert_eq!(infer_skills(Some("account")), vec!["single-thread-alert", "icp-discovery"]);
        assert_eq!(
            infer_skills(Some("rep")),
            vec!["pipeline-coverage", "pipeline-hygiene", "rep-scorecard"]
        );
        assert_eq!(
            infer_skills(Some("pipeline")),
            vec!["pipeline-hygiene", "pipeline-coverage", "pipeline-waterfall", "forecast-rollup"]
        );
        assert_eq!(
            infer_skills(Some("forecast")),
            vec!["forecast-rollup", "pipeline-hygiene", "pipeline-coverage"]
        );
        assert_eq!(infer_skills(Some("segment")), vec!["icp-discovery", "pipeline-hygiene"]);
        assert_eq!(
            infer_skills(Some("time_range")),
            vec!["pipeline-hygiene", "pipeline-waterfall"]
        );
    }

    #[test]
    fn missing_or_unknown_scope_defaults_to_hygiene() {
        assert_eq!(infer_skills(None), vec!["pipeline-hygiene"]);
        assert_eq!(infer_skills(Some("territory")), vec!["pipeline-hygiene"]);
    }

    #[test]
    fn merge_fills_missing_scope() {
        let ctx = UiContext {
            scope_type: Some("deal".into()),
            scope_entity: Some("Acme".into()),
            ..Default::default()
        };
        let merged = merge_ui_context(decision(), Some(&ctx));
        assert_eq!(merged.scope_type.as_deref(), Some("deal"));
        assert_eq!(merged.scope_entity.as_deref(), Some("Acme"));
    }

    #[test]
    fn merge_keeps_classifier_scope() {
        let mut d = decision();
        d.scope_type = Some("rep".into());
        d.scope_entity = Some("Sarah".into());
        let ctx = UiContext {
            scope_type: Some("deal".into()),
            scope_entity: Some("Acme".into()),
            ..Default::default()
        };
        let merged = merge_ui_context(d, Some(&ctx));
        assert_eq!(merged.scope_type.as_deref(), Some("rep"));
        assert_eq!(merged.scope_entity.as_deref(), Some("Sarah"));
    }

    #[test]
    fn merge_without_ui_scope_is_a_no_op() {
        let ctx = UiContext {
            scope_entity: Some("Acme".into()),
            source: Some("slack".into()),
            ..Default::default()
        };
        assert_eq!(merge_ui_context(decision(), Some(&ctx)), decision());
        assert_eq!(merge_ui_context(decision(), None), decision());
    }
}
