// bizlicense-core/src/infrastructure/report/mod.rs

pub mod citations;
pub mod context;
pub mod jinja;
pub mod llm;
pub mod template;

use std::sync::Arc;

pub use citations::CitationAnnotator;
pub use llm::LlmReportGenerator;
pub use template::TemplateReportGenerator;

use crate::infrastructure::config::{ReportConfig, ReportProvider};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::ReportGenerator;

/// Picks the report generator named by the configuration.
pub fn build_report_generator(
    settings: &ReportConfig,
) -> Result<Arc<dyn ReportGenerator>, InfrastructureError> {
    Ok(match settings.provider {
        ReportProvider::Template => Arc::new(TemplateReportGenerator::new()?),
        ReportProvider::Llm => Arc::new(LlmReportGenerator::from_env(settings.clone())?),
    })
}
