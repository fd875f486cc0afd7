//! Classifier prompts.

use crate::catalog::{DELIVERABLES, SKILLS};

/// Fixed instruction sent as the system prompt on every classification call.
pub fn system_prompt() -> String {
    format!(
        r#"You route requests for a revenue-operations assistant. Classify the user's request into exactly ONE of four types.

1. evidence_inquiry: the user asks what an existing analysis found.
   Signal words: "what did", "show me the findings", "how many", "which deals were flagged", "latest results".
   Example: "What did pipeline hygiene flag last week?" -> target_skill "pipeline-hygiene"

2. scoped_analysis: the user wants reasoning about a specific deal, account, rep, pipeline, forecast, segment or time range.
   Signal words: "why", "should I worry", "what's going on with", "how is", "compare".
   Example: "Why is the Acme renewal slipping?" -> scope_type "deal", scope_entity "Acme renewal"
   Example: "How is Sarah tracking against quota?" -> scope_type "rep", scope_entity "Sarah"

3. deliverable_request: the user wants a document, report or map built.
   Signal words: "build", "create", "generate", "put together", "draft".
   Example: "Put together a forecast brief for the board" -> deliverable_type "forecast_brief"

4. skill_execution: the user wants an analysis run now.
   Signal words: "run", "rerun", "refresh", "recompute", "check again".
   Example: "Recompute coverage for this quarter" -> skill_id "pipeline-coverage"

Known skill ids: {skills}
Known deliverable ids: {deliverables}
Valid scope_type values: deal, account, rep, pipeline, forecast, segment, time_range
Only use skill ids and deliverable ids from these lists. Use the workspace context to tell which skills already have evidence.

If the request is ambiguous, set needs_clarification to true and ask one short clarification_question.

Respond with ONLY a JSON object with exactly these fields. Use null for any field that does not apply; never omit a field:
{{
  "type": "evidence_inquiry" | "scoped_analysis" | "deliverable_request" | "skill_execution",
  "confidence": number between 0 and 1,
  "target_skill": string | null,
  "target_metric": string | null,
  "scope_type": string | null,
  "scope_entity": string | null,
  "scope_question": string | null,
  "skills_to_consult": [string] | null,
  "deliverable_type": string | null,
  "skill_id": string | null,
  "needs_clarification": boolean,
  "clarification_question": string | null
}}"#,
        skills = SKILLS.join(", "),
        deliverables = DELIVERABLES.join(", "),
    )
}

/// The per-request prompt: workspace digest followed by the raw request.
pub fn user_prompt(digest: &str, user_input: &str) -> String {
    format!("## Workspace context\n{digest}\n\n## User request\n{user_input}")
}
