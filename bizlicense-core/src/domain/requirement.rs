// bizlicense-core/src/domain/requirement.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::predicate::ApplicabilityPredicate;

// Declaration order gives Mandatory < Recommended < Optional, which is the
// display order of report sections. Matching never looks at the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementLevel {
    Mandatory,
    Recommended,
    Optional,
}

impl RequirementLevel {
    pub const ALL: [RequirementLevel; 3] = [Self::Mandatory, Self::Recommended, Self::Optional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mandatory => "mandatory",
            Self::Recommended => "recommended",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for RequirementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequirementLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mandatory" => Ok(Self::Mandatory),
            "recommended" => Ok(Self::Recommended),
            "optional" => Ok(Self::Optional),
            _ => Err(format!("Unknown requirement level: {}", s)),
        }
    }
}

/// One catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementRecord {
    pub id: String,
    pub title: String,
    pub level: RequirementLevel,
    pub summary: String,
    pub authority: String,
    pub source_ref: String,
    #[serde(default)]
    pub applies_if: ApplicabilityPredicate,
}

impl RequirementRecord {
    /// Load-time sanity checks on a single record.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::invalid_requirement(
                "<empty>",
                "id must not be empty",
            ));
        }
        if self.title.trim().is_empty() {
            return Err(DomainError::invalid_requirement(&self.id, "title must not be empty"));
        }
        if self.authority.trim().is_empty() {
            return Err(DomainError::invalid_requirement(
                &self.id,
                "authority must not be empty",
            ));
        }
        self.applies_if
            .check()
            .map_err(|reason| DomainError::invalid_requirement(&self.id, reason))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_level_ordering_follows_display_order() {
        assert!(RequirementLevel::Mandatory < RequirementLevel::Recommended);
        assert!(RequirementLevel::Recommended < RequirementLevel::Optional);
    }

    #[test]
    fn test_level_display_and_parsing_consistency() {
        for level in RequirementLevel::ALL {
            assert_eq!(RequirementLevel::from_str(&level.to_string()).unwrap(), level);
        }
        assert_eq!(
            RequirementLevel::from_str("MANDATORY").unwrap(),
            RequirementLevel::Mandatory
        );
        assert!(RequirementLevel::from_str("critical").is_err());
    }

    #[test]
    fn test_record_deserialization() -> anyhow::Result<()> {
        let record: RequirementRecord = serde_json::from_str(
            r#"{
                "id": "ventilation",
                "title": "Kitchen ventilation approval",
                "level": "mandatory",
                "applies_if": { "area_m2": { "min": 40 }, "serves_food": true },
                "summary": "Approval for the kitchen ventilation system",
                "authority": "City Engineer",
                "source_ref": "licensing-guide.pdf"
            }"#,
        )?;

        assert_eq!(record.level, RequirementLevel::Mandatory);
        assert_eq!(record.applies_if.serves_food, Some(true));
        assert_eq!(record.applies_if.area_m2.and_then(|b| b.min), Some(40.0));
        assert!(record.check().is_ok());
        Ok(())
    }

    #[test]
    fn test_record_rejects_unknown_fields() {
        let res: Result<RequirementRecord, _> = serde_json::from_str(
            r#"{ "id": "x", "title": "X", "level": "optional", "summary": "", "authority": "A", "source_ref": "", "cost": "100" }"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_record_requires_summary_and_source_ref() {
        let without_summary: Result<RequirementRecord, _> = serde_json::from_str(
            r#"{ "id": "x", "title": "X", "level": "optional", "authority": "A", "source_ref": "R" }"#,
        );
        assert!(without_summary.is_err());

        let without_source: Result<RequirementRecord, _> = serde_json::from_str(
            r#"{ "id": "x", "title": "X", "level": "optional", "summary": "S", "authority": "A" }"#,
        );
        assert!(without_source.is_err());
    }

    #[test]
    fn test_record_check_requires_id() {
        let record: RequirementRecord = serde_json::from_str(
            r#"{ "id": " ", "title": "X", "level": "optional", "summary": "S", "authority": "A", "source_ref": "R" }"#,
        )
        .unwrap();
        assert!(record.check().is_err());
    }
}
