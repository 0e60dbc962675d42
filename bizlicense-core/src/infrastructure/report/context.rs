// bizlicense-core/src/infrastructure/report/context.rs

use serde_json::{Value, json};

use crate::domain::{BusinessProfile, MatchResult, RequirementLevel};

fn section_heading(level: RequirementLevel) -> &'static str {
    match level {
        RequirementLevel::Mandatory => "Mandatory requirements",
        RequirementLevel::Recommended => "Recommended requirements",
        RequirementLevel::Optional => "Optional requirements",
    }
}

/// Template context shared by the report and the prompt.
///
/// Only caller-supplied profile fields are exposed; the derived food-service
/// flag stays inside the matcher.
pub fn report_context(profile: &BusinessProfile, matched: &MatchResult<'_>) -> Value {
    let sections: Vec<Value> = RequirementLevel::ALL
        .iter()
        .map(|&level| {
            json!({
                "level": level.as_str(),
                "heading": section_heading(level),
                "items": matched.by_level(level),
                "authorities": matched.authorities(level),
            })
        })
        .collect();

    json!({
        "profile": {
            // f64 Display prints 50 rather than 50.0
            "area_m2": profile.area_m2.to_string(),
            "seats": profile.seats.to_string(),
            "gas": profile.gas,
            "serves_meat": profile.serves_meat,
            "deliveries": profile.deliveries,
        },
        "total": matched.len(),
        "requirements": matched,
        "sections": sections,
    })
}
