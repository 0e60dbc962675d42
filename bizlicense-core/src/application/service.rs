// bizlicense-core/src/application/service.rs

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::{BusinessProfile, Catalog, CatalogSummary, MatchResult, RequirementRecord, match_requirements};
use crate::error::LicenseError;
use crate::ports::ReportGenerator;

// --- DTOs ---
// What the CLI prints with `--format json`.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResponse<'c> {
    pub matched_requirements: Vec<&'c RequirementRecord>,
    pub business_input: BusinessProfile,
}

impl<'c> MatchResponse<'c> {
    /// Validates and matches without a report generator.
    pub fn evaluate(profile: &BusinessProfile, catalog: &'c Catalog) -> Result<Self, LicenseError> {
        profile.check()?;
        Ok(Self {
            matched_requirements: match_requirements(profile, catalog).as_slice().to_vec(),
            business_input: profile.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport<'c> {
    pub report: String,
    pub generator: &'static str,
    pub generated_at: String,
    pub matched_requirements: Vec<&'c RequirementRecord>,
    pub business_input: BusinessProfile,
}

/// Validation -> Matching -> Reporting, over one immutable catalog.
///
/// Cheap to clone; the catalog and the generator are shared.
#[derive(Clone)]
pub struct ComplianceService {
    catalog: Arc<Catalog>,
    reporter: Arc<dyn ReportGenerator>,
}

impl ComplianceService {
    pub fn new(catalog: Arc<Catalog>, reporter: Arc<dyn ReportGenerator>) -> Self {
        Self { catalog, reporter }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn summary(&self) -> CatalogSummary {
        self.catalog.summary()
    }

    #[instrument(skip_all, fields(area_m2 = profile.area_m2, seats = profile.seats))]
    pub fn match_profile(&self, profile: &BusinessProfile) -> Result<MatchResult<'_>, LicenseError> {
        profile.check()?;
        let matched = match_requirements(profile, &self.catalog);
        info!(matched = matched.len(), catalog = self.catalog.len(), "Profile matched");
        Ok(matched)
    }

    pub fn match_response(&self, profile: &BusinessProfile) -> Result<MatchResponse<'_>, LicenseError> {
        let response = MatchResponse::evaluate(profile, &self.catalog)?;
        info!(matched = response.matched_requirements.len(), catalog = self.catalog.len(), "Profile matched");
        Ok(response)
    }

    #[instrument(skip_all, fields(generator = self.reporter.name()))]
    pub async fn report(&self, profile: &BusinessProfile) -> Result<ComplianceReport<'_>, LicenseError> {
        let matched = self.match_profile(profile)?;
        let generated = self.reporter.generate(profile, &matched).await?;
        info!(produced_by = generated.generator, bytes = generated.text.len(), "Report generated");

        Ok(ComplianceReport {
            report: generated.text,
            generator: generated.generator,
            generated_at: Utc::now().to_rfc3339(),
            matched_requirements: matched.as_slice().to_vec(),
            business_input: profile.clone(),
        })
    }
}
