//! Display helpers used when rendering the workspace digest.

use chrono::{DateTime, Utc};

/// `pipeline-hygiene` → `Pipeline Hygiene`.
pub fn format_skill_name(skill_id: &str) -> String {
    skill_id
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Coarse age of a timestamp relative to `now`.
///
/// Only for the digest. Freshness decisions use the precomputed
/// `is_stale` flag, never this.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let hours = elapsed.num_hours();

    if hours < 1 {
        return "just now".into();
    }
    if hours < 24 {
        return ago(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < 7 {
        return ago(days, "day");
    }
    ago(days / 7, "week")
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
