//! Known skills and deliverables.
//!
//! The PreRouter's command table and the classifier prompt are both generated
//! from these lists, so adding a skill here makes it routable everywhere.

/// Skill ids the platform can run.
pub const SKILLS: &[&str] = &[
    "pipeline-hygiene",
    "pipeline-coverage",
    "pipeline-waterfall",
    "forecast-rollup",
    "single-thread-alert",
    "icp-discovery",
    "rep-scorecard",
    "deal-risk-review",
];

/// Deliverable (template) ids the platform can build.
pub const DELIVERABLES: &[&str] = &[
    "sales_process_map",
    "pipeline_review",
    "forecast_brief",
    "icp_profile",
];

/// `sales_process_map` → `sales process map`.
pub fn deliverable_label(deliverable_id: &str) -> String {
    deliverable_id.replace('_', " ")
}

/// `pipeline-hygiene` → `pipeline hygiene`.
pub fn skill_phrase(skill_id: &str) -> String {
    skill_id.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(deliverable_label("sales_process_map"), "sales process map");
        assert_eq!(skill_phrase("single-thread-alert"), "single thread alert");
    }

    #[test]
    fn catalogue_has_no_duplicates() {
        let mut skills = SKILLS.to_vec();
        skills.sort_unstable();
        skills.dedup();
        assert_eq!(skills.len(), SKILLS.len());

        let mut deliverables = DELIVERABLES.to_vec();
        deliverables.sort_unstable();
        deliverables.dedup();
        assert_eq!(deliverables.len(), DELIVERABLES.len());
    }
}
