//! Freshness resolution: turns a first-pass classification into a decision.
//!
//! Branches on request type:
//!
//! | type                  | work                                             | wait            |
//! |-----------------------|--------------------------------------------------|-----------------|
//! | `evidence_inquiry`    | revise to `skill_execution` if no evidence       | `< 1 second`    |
//! | `scoped_analysis`     | stale subset of the skills to consult            | `3-5` / `10-30` |
//! | `deliverable_request` | template readiness, stale skills copied over     | `30-60 seconds` |
//! | `skill_execution`     | none                                             | `10-30 seconds` |
//!
//! The classification is never modified. The decision is built fresh, and the
//! evidence revision is logged with both the first-pass and the final type.

use revroute_core::decision::{EstimatedWait, RequestType, RouterDecision};
use revroute_core::workspace::WorkspaceStateIndex;
use tracing::{debug, info, warn};

use crate::classifier::Classification;
use crate::presentation::format_skill_name;
use crate::scope::infer_skills;

const NOT_READY_FALLBACK: &str = "This deliverable isn't ready to generate yet.";

/// Stateless resolver over a single snapshot.
pub struct FreshnessResolver;

impl FreshnessResolver {
    /// Resolve staleness, readiness, clarification and wait time.
    pub fn resolve(first_pass: &Classification, state: WorkspaceStateIndex) -> RouterDecision {
        let decision = match first_pass.request_type {
            RequestType::EvidenceInquiry => Self::evidence_inquiry(first_pass, state),
            RequestType::ScopedAnalysis => Self::scoped_analysis(first_pass, state),
            RequestType::DeliverableRequest => Self::deliverable_request(first_pass, state),
            RequestType::SkillExecution => {
                base_decision(first_pass, state, EstimatedWait::TenToThirtySeconds)
            }
        };

        if decision.request_type != first_pass.request_type {
            info!(
                first_pass = %first_pass.request_type,
                final_type = %decision.request_type,
                "Revised classification"
            );
        }
        debug!(
            request_type = %decision.request_type,
            stale = ?decision.stale_skills_to_rerun,
            wait = %decision.estimated_wait,
            needs_clarification = decision.needs_clarification,
            "Freshness resolved"
        );

        decision
    }

    fn evidence_inquiry(first_pass: &Classification, state: WorkspaceStateIndex) -> RouterDecision {
        let missing = first_pass
            .target_skill
            .as_deref()
            .filter(|skill| !state.has_evidence(skill))
            .map(str::to_string);

        let Some(skill_id) = missing else {
            return base_decision(first_pass, state, EstimatedWait::UnderOneSecond);
        };

        let name = format_skill_name(&skill_id);
        let mut decision = base_decision(first_pass, state, EstimatedWait::TenToThirtySeconds);
        decision.request_type = RequestType::SkillExecution;
        decision.skill_id = Some(skill_id);
        decision.needs_clarification = true;
        decision.clarification_question = Some(format!(
            "I don't have any {name} results for this workspace yet. \
             Want me to run {name} first? It usually takes 10-30 seconds."
        ));
        decision
    }

    fn scoped_analysis(first_pass: &Classification, state: WorkspaceStateIndex) -> RouterDecision {
        let skills = match &first_pass.skills_to_consult {
            Some(skills) if !skills.is_empty() => skills.clone(),
            _ => infer_skills(first_pass.scope_type.as_deref()),
        };

        let mut stale: Vec<String> = Vec::new();
        for skill in &skills {
            if state.is_stale(skill) && !stale.contains(skill) {
                stale.push(skill.clone());
            }
        }

        let wait = if stale.is_empty() {
            EstimatedWait::ThreeToFiveSeconds
        } else {
            EstimatedWait::TenToThirtySeconds
        };

        let mut decision = base_decision(first_pass, state, wait);
        decision.skills_to_consult = Some(skills);
        decision.stale_skills_to_rerun = stale;
        decision
    }

    fn deliverable_request(
        first_pass: &Classification,
        state: WorkspaceStateIndex,
    ) -> RouterDecision {
        let deliverable_id = first_pass
            .deliverable_type
            .clone()
            .or_else(|| first_pass.template_id.clone());

        let readiness = deliverable_id
            .as_deref()
            .and_then(|id| state.readiness(id))
            .cloned();

        let mut decision = base_decision(first_pass, state, EstimatedWait::ThirtyToSixtySeconds);
        if decision.template_id.is_none() {
            decision.template_id = deliverable_id.clone();
        }

        match readiness {
            Some(record) => {
                if !record.ready {
                    let reason = record.reason.trim();
                    decision.needs_clarification = true;
                    decision.clarification_question = Some(if reason.is_empty() {
                        NOT_READY_FALLBACK.to_string()
                    } else {
                        record.reason.clone()
                    });
                }
                let mut stale: Vec<String> = Vec::new();
                for skill in record.stale_skills {
                    if !stale.contains(&skill) {
                        stale.push(skill);
                    }
                }
                decision.stale_skills_to_rerun = stale;
            }
            None => {
                // Unknown template readiness: fail open, the deliverable
                // pipeline validates the id itself.
                warn!(
                    deliverable = deliverable_id.as_deref().unwrap_or("<none>"),
                    "No readiness record for deliverable"
                );
            }
        }

        decision
    }
}

/// Copy the classifier's fields into a fresh decision with an empty rerun set.
fn base_decision(
    first_pass: &Classification,
    state: WorkspaceStateIndex,
    wait: EstimatedWait,
) -> RouterDecision {
    let mut d = RouterDecision::new(first_pass.request_type, first_pass.confidence, wait, state);
    d.target_skill = first_pass.target_skill.clone();
    d.target_metric = first_pass.target_metric.clone();
    d.scope_type = first_pass.scope_type.clone();
    d.scope_entity = first_pass.scope_entity.clone();
    d.scope_question = first_pass.scope_question.clone();
    d.skills_to_consult = first_pass.skills_to_consult.clone();
    d.deliverable_type = first_pass.deliverable_type.clone();
    d.template_id = first_pass.template_id.clone();
    d.skill_id = first_pass.skill_id.clone();
    d.skill_params = first_pass.skill_params.clone();
    d.needs_clarification = first_pass.needs_clarification;
    d.clarification_question = first_pass.clarification_question.clone();
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{skill, workspace};
    use revroute_core::workspace::TemplateReadiness;

    fn classification(request_type: RequestType) -> Classification {
        Classification::of_type(request_type, 0.8)
    }

    // --- evidence_inquiry ---

    #[test]
    fn inquiry_with_evidence_is_a_pure_read() {
        let state = workspace(&[("pipeline-hygiene", skill(true, true))], &[]);
        let c = Classification {
            target_skill: Some("pipeline-hygiene".into()),
            ..classification(RequestType::EvidenceInquiry)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert_eq!(d.request_type, RequestType::EvidenceInquiry);
        assert_eq!(d.estimated_wait, EstimatedWait::UnderOneSecond);
        assert!(!d.needs_clarification);
        assert!(d.stale_skills_to_rerun.is_empty());
    }

    #[test]
    fn inquiry_without_evidence_becomes_skill_execution() {
        let state = workspace(&[("icp-discovery", skill(false, false))], &[]);
        let c = Classification {
            target_skill: Some("icp-discovery".into()),
            ..classification(RequestType::EvidenceInquiry)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert_eq!(d.request_type, RequestType::SkillExecution);
        assert_eq!(d.skill_id.as_deref(), Some("icp-discovery"));
        assert!(d.needs_clarification);
        let q = d.clarification_question.unwrap();
        assert!(q.contains("Icp Discovery"));
        assert!(d.stale_skills_to_rerun.is_empty());
        // first pass is untouched
        assert_eq!(c.request_type, RequestType::EvidenceInquiry);
    }

    #[test]
    fn inquiry_for_skill_absent_from_index_is_revised() {
        let c = Classification {
            target_skill: Some("rep-scorecard".into()),
            ..classification(RequestType::EvidenceInquiry)
        };
        let d = FreshnessResolver::resolve(&c, WorkspaceStateIndex::default());
        assert_eq!(d.request_type, RequestType::SkillExecution);
        assert_eq!(d.skill_id.as_deref(), Some("rep-scorecard"));
    }

    #[test]
    fn inquiry_without_target_skill_is_a_pure_read() {
        let c = Classification {
            target_metric: Some("win_rate".into()),
            ..classification(RequestType::EvidenceInquiry)
        };
        let d = FreshnessResolver::resolve(&c, WorkspaceStateIndex::default());
        assert_eq!(d.request_type, RequestType::EvidenceInquiry);
        assert_eq!(d.estimated_wait, EstimatedWait::UnderOneSecond);
    }

    // --- scoped_analysis ---

    #[test]
    fn pipeline_scope_reruns_only_stale_members() {
        let state = workspace(
            &[
                ("pipeline-hygiene", skill(true, false)),
                ("pipeline-coverage", skill(true, false)),
                ("pipeline-waterfall", skill(true, true)),
                ("forecast-rollup", skill(true, false)),
                ("icp-discovery", skill(true, true)),
            ],
            &[],
        );
        let c = Classification {
            scope_type: Some("pipeline".into()),
            ..classification(RequestType::ScopedAnalysis)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert_eq!(d.stale_skills_to_rerun, vec!["pipeline-waterfall".to_string()]);
        assert_eq!(d.estimated_wait, EstimatedWait::TenToThirtySeconds);
        assert_eq!(d.skills_to_consult.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn fresh_scope_is_quick() {
        let state = workspace(&[("pipeline-hygiene", skill(true, false))], &[]);
        let c = Classification {
            scope_type: Some("deal".into()),
            ..classification(RequestType::ScopedAnalysis)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert!(d.stale_skills_to_rerun.is_empty());
        assert_eq!(d.estimated_wait, EstimatedWait::ThreeToFiveSeconds);
    }

    #[test]
    fn explicit_skills_override_scope_table() {
        let state = workspace(
            &[("rep-scorecard", skill(true, true)), ("pipeline-hygiene", skill(true, true))],
            &[],
        );
        let c = Classification {
            scope_type: Some("deal".into()),
            skills_to_consult: Some(vec!["rep-scorecard".into(), "rep-scorecard".into()]),
            ..classification(RequestType::ScopedAnalysis)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert_eq!(d.stale_skills_to_rerun, vec!["rep-scorecard".to_string()]);
    }

    #[test]
    fn unknown_scope_consults_hygiene() {
        let state = workspace(&[("pipeline-hygiene", skill(true, true))], &[]);
        let c = classification(RequestType::ScopedAnalysis);
        let d = FreshnessResolver::resolve(&c, state);
        assert_eq!(d.skills_to_consult, Some(vec!["pipeline-hygiene".to_string()]));
        assert_eq!(d.stale_skills_to_rerun, vec!["pipeline-hygiene".to_string()]);
    }

    // --- deliverable_request ---

    fn not_ready() -> TemplateReadiness {
        TemplateReadiness {
            ready: false,
            reason: "The sales process map needs closed-won deals with stage history.".into(),
            stale_skills: vec!["pipeline-waterfall".into(), "icp-discovery".into()],
        }
    }

    #[test]
    fn unready_template_asks_with_reason_verbatim() {
        let state = workspace(&[], &[("sales_process_map", not_ready())]);
        let c = Classification {
            deliverable_type: Some("sales_process_map".into()),
            ..classification(RequestType::DeliverableRequest)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert!(d.needs_clarification);
        assert_eq!(d.clarification_question.as_deref(), Some(not_ready().reason.as_str()));
        assert_eq!(
            d.stale_skills_to_rerun,
            vec!["pipeline-waterfall".to_string(), "icp-discovery".to_string()]
        );
        assert_eq!(d.estimated_wait, EstimatedWait::ThirtyToSixtySeconds);
        assert_eq!(d.template_id.as_deref(), Some("sales_process_map"));
    }

    #[test]
    fn ready_template_still_copies_stale_skills() {
        let record = TemplateReadiness {
            ready: true,
            reason: String::new(),
            stale_skills: vec!["forecast-rollup".into()],
        };
        let state = workspace(&[], &[("forecast_brief", record)]);
        let c = Classification {
            template_id: Some("forecast_brief".into()),
            ..classification(RequestType::DeliverableRequest)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert!(!d.needs_clarification);
        assert_eq!(d.stale_skills_to_rerun, vec!["forecast-rollup".to_string()]);
    }

    #[test]
    fn unready_template_with_blank_reason_still_asks() {
        let record = TemplateReadiness {
            ready: false,
            reason: " ".into(),
            stale_skills: vec![],
        };
        let state = workspace(&[], &[("icp_profile", record)]);
        let c = Classification {
            deliverable_type: Some("icp_profile".into()),
            ..classification(RequestType::DeliverableRequest)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert!(d.is_clarifying());
    }

    #[test]
    fn unknown_template_fails_open() {
        let c = Classification {
            deliverable_type: Some("board_deck".into()),
            ..classification(RequestType::DeliverableRequest)
        };
        let d = FreshnessResolver::resolve(&c, WorkspaceStateIndex::default());
        assert!(!d.needs_clarification);
        assert!(d.stale_skills_to_rerun.is_empty());
        assert_eq!(d.estimated_wait, EstimatedWait::ThirtyToSixtySeconds);
    }

    // --- skill_execution ---

    #[test]
    fn skill_execution_skips_staleness() {
        let state = workspace(&[("pipeline-hygiene", skill(true, true))], &[]);
        let c = Classification {
            skill_id: Some("pipeline-hygiene".into()),
            ..classification(RequestType::SkillExecution)
        };
        let d = FreshnessResolver::resolve(&c, state);
        assert_eq!(d.estimated_wait, EstimatedWait::TenToThirtySeconds);
        assert!(d.stale_skills_to_rerun.is_empty());
    }

    #[test]
    fn classifier_clarification_is_carried_through() {
        let c = Classification {
            needs_clarification: true,
            clarification_question: Some("Which quarter?".into()),
            ..classification(RequestType::SkillExecution)
        };
        let d = FreshnessResolver::resolve(&c, WorkspaceStateIndex::default());
        assert!(d.is_clarifying());
        assert_eq!(d.clarification_question.as_deref(), Some("Which quarter?"));
    }
}
