//! `revroute patterns`: List the pre-routed command table.

use revroute_router::{MatchKind, PatternOutcome, PreRouter};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pre_router = PreRouter::standard()?;

    println!("revroute pre-routed commands");
    println!("============================");
    for entry in pre_router.entries() {
        let kind = match entry.match_kind {
            MatchKind::Exact => "exact",
            MatchKind::Prefix => "prefix",
        };
        let target = match &entry.outcome {
            PatternOutcome::RunSkill { skill_id } => format!("skill_execution  {skill_id}"),
            PatternOutcome::BuildDeliverable { deliverable_id } => {
                format!("deliverable      {deliverable_id}")
            }
            PatternOutcome::WorkspaceStatus => "evidence_inquiry workspace_status".to_string(),
        };
        println!("  {kind:<6}  {:<40}  {target}", entry.pattern);
    }
    println!("\n  {} patterns", pre_router.entries().len());

    Ok(())
}
