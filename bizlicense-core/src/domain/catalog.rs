// bizlicense-core/src/domain/catalog.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::requirement::{RequirementLevel, RequirementRecord};

/// What to do when two records share an id while building a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first record seen for an id, drop later ones.
    #[default]
    FirstWins,
    /// Keep the last record seen for an id, at the position of the first.
    LastWins,
    /// Refuse to build the catalog.
    Reject,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstWins => "first_wins",
            Self::LastWins => "last_wins",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "first_wins" => Ok(Self::FirstWins),
            "last_wins" => Ok(Self::LastWins),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("Unknown duplicate policy: {}", s)),
        }
    }
}

/// The immutable requirement catalog.
///
/// Built once, then shared (usually behind an `Arc`) by every matching call.
/// There is no mutation API: a different catalog means building a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<RequirementRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub requirements_count: usize,
    pub mandatory: usize,
    pub recommended: usize,
    pub optional: usize,
}

impl Catalog {
    /// Validates every record and resolves duplicate ids according to `policy`.
    /// Catalog order is the order of first appearance of each id.
    pub fn build(
        records: Vec<RequirementRecord>,
        policy: DuplicatePolicy,
    ) -> Result<Self, DomainError> {
        let mut kept: Vec<RequirementRecord> = Vec::with_capacity(records.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for record in records {
            record.check()?;

            match positions.get(&record.id).copied() {
                None => {
                    positions.insert(record.id.clone(), kept.len());
                    kept.push(record);
                }
                Some(idx) => match policy {
                    DuplicatePolicy::Reject => {
                        return Err(DomainError::DuplicateRequirement(record.id));
                    }
                    DuplicatePolicy::FirstWins => {
                        warn!(id = %record.id, source = %record.source_ref, "Dropping duplicate requirement (first wins)");
                    }
                    DuplicatePolicy::LastWins => {
                        warn!(id = %record.id, source = %kept[idx].source_ref, "Replacing duplicate requirement (last wins)");
                        kept[idx] = record;
                    }
                },
            }
        }

        Ok(Self { records: kept })
    }

    pub fn records(&self) -> &[RequirementRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequirementRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&RequirementRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn summary(&self) -> CatalogSummary {
        let count = |level: RequirementLevel| self.records.iter().filter(|r| r.level == level).count();
        CatalogSummary {
            requirements_count: self.records.len(),
            mandatory: count(RequirementLevel::Mandatory),
            recommended: count(RequirementLevel::Recommended),
            optional: count(RequirementLevel::Optional),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a RequirementRecord;
    type IntoIter = std::slice::Iter<'a, RequirementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
