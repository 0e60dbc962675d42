// bizlicense-core/src/ports/report.rs

// What the application needs from a report writer, without knowing whether
// the text comes from a template or from a language model.

use crate::domain::{BusinessProfile, MatchResult};
use crate::error::LicenseError;
use async_trait::async_trait;

#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Short name recorded on the produced report (ex: "template", "llm").
    fn name(&self) -> &'static str;

    /// Renders the report text for an already matched profile.
    /// Returns the text and the name of the generator that actually produced it.
    async fn generate(
        &self,
        profile: &BusinessProfile,
        matched: &MatchResult<'_>,
    ) -> Result<GeneratedReport, LicenseError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    pub text: String,
    pub generator: &'static str,
}
