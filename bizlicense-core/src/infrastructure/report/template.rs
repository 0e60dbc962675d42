// bizlicense-core/src/infrastructure/report/template.rs

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::context::report_context;
use super::jinja::{JinjaRenderer, REPORT_TEMPLATE};
use crate::domain::{BusinessProfile, MatchResult};
use crate::error::LicenseError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::{GeneratedReport, ReportGenerator};

/// Deterministic markdown report. Same input, same bytes.
pub struct TemplateReportGenerator {
    renderer: Arc<JinjaRenderer>,
}

impl TemplateReportGenerator {
    pub const NAME: &'static str = "template";

    pub fn new() -> Result<Self, InfrastructureError> {
        Ok(Self::with_renderer(Arc::new(JinjaRenderer::new()?)))
    }

    pub fn with_renderer(renderer: Arc<JinjaRenderer>) -> Self {
        Self { renderer }
    }

    pub fn render(
        &self,
        profile: &BusinessProfile,
        matched: &MatchResult<'_>,
    ) -> Result<String, InfrastructureError> {
        let ctx = report_context(profile, matched);
        let text = self.renderer.render(REPORT_TEMPLATE, &ctx)?;
        debug!(bytes = text.len(), "Rendered template report");
        Ok(text)
    }
}

#[async_trait]
impl ReportGenerator for TemplateReportGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn generate(
        &self,
        profile: &BusinessProfile,
        matched: &MatchResult<'_>,
    ) -> Result<GeneratedReport, LicenseError> {
        Ok(GeneratedReport {
            text: self.render(profile, matched)?,
            generator: Self::NAME,
        })
    }
}
