//! Parsing and validation of raw engine output.

use revroute_core::decision::RequestType;
use serde::Deserialize;

use super::Classification;

const DEFAULT_CONFIDENCE: f32 = 0.5;
const GENERIC_CLARIFICATION: &str =
    "Could you tell me a bit more about what you'd like me to look at?";

/// The engine answered, but not with a usable classification.
///
/// Never escapes the classifier; it is logged and replaced by
/// [`Classification::fallback`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("unusable classifier output: {reason}")]
pub struct ClassificationParseError {
    pub reason: String,
}

/// Pull the JSON object out of an engine reply.
///
/// Handles ```` ```json ```` fences, bare fences, and prose around the object.
pub fn extract_json(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(start) = text.find("```") {
        let after = &text[start + 3..];
        let after = after.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        text = match after.find("```") {
            Some(end) => &after[..end],
            None => after,
        }
        .trim();
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && start < end
    {
        text = &text[start..=end];
    }

    text
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(rename = "type")]
    request_type: RequestType,
    confidence: Option<f32>,
    target_skill: Option<String>,
    target_metric: Option<String>,
    scope_type: Option<String>,
    scope_entity: Option<String>,
    scope_question: Option<String>,
    skills_to_consult: Option<Vec<String>>,
    deliverable_type: Option<String>,
    template_id: Option<String>,
    skill_id: Option<String>,
    skill_params: Option<serde_json::Map<String, serde_json::Value>>,
    needs_clarification: Option<bool>,
    clarification_question: Option<String>,
}

/// Decode and validate engine output into a first-pass classification.
pub fn parse_classification(raw: &str) -> Result<Classification, ClassificationParseError> {
    let json = extract_json(raw);
    if json.is_empty() {
        return Err(ClassificationParseError {
            reason: "empty output".into(),
        });
    }

    let parsed: RawClassification =
        serde_json::from_str(json).map_err(|e| ClassificationParseError {
            reason: e.to_string(),
        })?;

    let confidence = match parsed.confidence {
        Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
        _ => DEFAULT_CONFIDENCE,
    };

    let needs_clarification = parsed.needs_clarification.unwrap_or(false);
    let mut clarification_question = non_empty(parsed.clarification_question);
    if needs_clarification && clarification_question.is_none() {
        clarification_question = Some(GENERIC_CLARIFICATION.into());
    }

    let skills_to_consult = parsed
        .skills_to_consult
        .map(|skills| {
            skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|skills| !skills.is_empty());

    Ok(Classification {
        request_type: parsed.request_type,
        confidence,
        target_skill: non_empty(parsed.target_skill),
        target_metric: non_empty(parsed.target_metric),
        scope_type: non_empty(parsed.scope_type).map(|s| s.to_lowercase()),
        scope_entity: non_empty(parsed.scope_entity),
        scope_question: non_empty(parsed.scope_question),
        skills_to_consult,
        deliverable_type: non_empty(parsed.deliverable_type),
        template_id: non_empty(parsed.template_id),
        skill_id: non_empty(parsed.skill_id),
        skill_params: parsed.skill_params,
        needs_clarification,
        clarification_question,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "type": "scoped_analysis",
        "confidence": 0.82,
        "target_skill": null,
        "target_metric": null,
        "scope_type": "Deal",
        "scope_entity": "Acme Renewal",
        "scope_question": "Why is it slipping?",
        "skills_to_consult": null,
        "deliverable_type": null,
        "skill_id": null,
        "needs_clarification": false,
        "clarification_question": null
    }"#;

    #[test]
    fn parses_plain_json() {
        let c = parse_classification(FULL).unwrap();
        assert_eq!(c.request_type, RequestType::ScopedAnalysis);
        assert_eq!(c.confidence, 0.82);
        assert_eq!(c.scope_type.as_deref(), Some("deal"));
        assert_eq!(c.scope_entity.as_deref(), Some("Acme Renewal"));
        assert!(c.skills_to_consult.is_none());
        assert!(!c.needs_clarification);
    }

    #[test]
    fn strips_json_fence() {
        let raw = format!("```json\n{FULL}\n```");
        assert!(parse_classification(&raw).is_ok());
    }

    #[test]
    fn strips_bare_fence_with_prose() {
        let raw = format!("Here is the classification:\n```\n{FULL}\n```\nLet me know!");
        let c = parse_classification(&raw).unwrap();
        assert_eq!(c.request_type, RequestType::ScopedAnalysis);
    }

    #[test]
    fn extracts_object_from_prose() {
        let raw = r#"Sure. {"type": "skill_execution", "confidence": 0.9, "skill_id": "rep-scorecard"} Done."#;
        let c = parse_classification(raw).unwrap();
        assert_eq!(c.request_type, RequestType::SkillExecution);
        assert_eq!(c.skill_id.as_deref(), Some("rep-scorecard"));
    }

    #[test]
    fn strips_explanation_after_object() {
        let raw = "{\"type\": \"skill_execution\", \"confidence\": 0.9, \"skill_id\": \"rep-scorecard\"}\n\n\
                   I picked skill_execution because the user asked to run it.";
        let c = parse_classification(raw).unwrap();
        assert_eq!(c.request_type, RequestType::SkillExecution);
        assert_eq!(c.confidence, 0.9);
        assert_eq!(c.skill_id.as_deref(), Some("rep-scorecard"));
    }

    #[test]
    fn extract_json_leaves_clean_object_alone() {
        assert_eq!(extract_json("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn rejects_unknown_type() {
        let err = parse_classification(r#"{"type": "small_talk", "confidence": 0.9}"#).unwrap_err();
        assert!(err.to_string().contains("unusable classifier output"));
    }

    #[test]
    fn rejects_non_json_and_empty() {
        assert!(parse_classification("I think this is a deal question.").is_err());
        assert!(parse_classification("").is_err());
        assert!(parse_classification("```json\n```").is_err());
        assert!(parse_classification("[1, 2, 3]").is_err());
    }

    #[test]
    fn missing_confidence_defaults_and_out_of_range_is_clamped() {
        let c = parse_classification(r#"{"type": "evidence_inquiry"}"#).unwrap();
        assert_eq!(c.confidence, DEFAULT_CONFIDENCE);
        let c = parse_classification(r#"{"type": "evidence_inquiry", "confidence": 7}"#).unwrap();
        assert_eq!(c.confidence, 1.0);
    }

    #[test]
    fn clarification_without_question_gets_generic_prompt() {
        let c = parse_classification(
            r#"{"type": "scoped_analysis", "needs_clarification": true, "clarification_question": "  "}"#,
        )
        .unwrap();
        assert!(c.needs_clarification);
        assert_eq!(c.clarification_question.as_deref(), Some(GENERIC_CLARIFICATION));
    }

    #[test]
    fn null_clarification_flag_means_false() {
        let c = parse_classification(r#"{"type": "skill_execution", "needs_clarification": null}"#).unwrap();
        assert!(!c.needs_clarification);
    }

    #[test]
    fn empty_skill_list_is_treated_as_absent() {
        let c = parse_classification(r#"{"type": "scoped_analysis", "skills_to_consult": ["", " "]}"#).unwrap();
        assert!(c.skills_to_consult.is_none());
        let c = parse_classification(
            r#"{"type": "scoped_analysis", "skills_to_consult": ["icp-discovery"]}"#,
        )
        .unwrap();
        assert_eq!(c.skills_to_consult, Some(vec!["icp-discovery".to_string()]));
    }
}
