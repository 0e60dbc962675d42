// bizlicense-core/src/domain/matcher.rs

use serde::Serialize;

use crate::domain::catalog::Catalog;
use crate::domain::profile::BusinessProfile;
use crate::domain::requirement::{RequirementLevel, RequirementRecord};

/// The requirements that apply to one profile, in catalog order.
///
/// Borrows from the catalog: records are never copied or mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MatchResult<'c> {
    requirements: Vec<&'c RequirementRecord>,
}

impl<'c> MatchResult<'c> {
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'c RequirementRecord> + '_ {
        self.requirements.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'c RequirementRecord] {
        &self.requirements
    }

    pub fn ids(&self) -> Vec<&'c str> {
        self.requirements.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.requirements.iter().any(|r| r.id == id)
    }

    pub fn by_level(&self, level: RequirementLevel) -> Vec<&'c RequirementRecord> {
        self.requirements
            .iter()
            .copied()
            .filter(|r| r.level == level)
            .collect()
    }

    pub fn count(&self, level: RequirementLevel) -> usize {
        self.requirements.iter().filter(|r| r.level == level).count()
    }

    /// Issuing authorities for one level, deduplicated, first-seen order.
    pub fn authorities(&self, level: RequirementLevel) -> Vec<&'c str> {
        let mut seen: Vec<&'c str> = Vec::new();
        for r in self.requirements.iter().filter(|r| r.level == level) {
            if !seen.contains(&r.authority.as_str()) {
                seen.push(r.authority.as_str());
            }
        }
        seen
    }
}

/// Filters the catalog down to the requirements whose predicate holds for
/// `profile`, after deriving food service from meat service.
///
/// Pure and total: expects a profile that already passed boundary validation
/// and never fails on one.
pub fn match_requirements<'c>(profile: &BusinessProfile, catalog: &'c Catalog) -> MatchResult<'c> {
    let effective = profile.effective();

    MatchResult {
        requirements: catalog
            .iter()
            .filter(|record| record.applies_if.is_satisfied_by(&effective))
            .collect(),
    }
}
