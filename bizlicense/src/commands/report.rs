// bizlicense/src/commands/report.rs
//
// USE CASE: Produce the licensing report (template or language model).

use std::path::PathBuf;
use tracing::info;

use bizlicense_core::application::ComplianceService;
use bizlicense_core::infrastructure::config::ReportProvider;
use bizlicense_core::infrastructure::fs::atomic_write;
use bizlicense_core::infrastructure::report::build_report_generator;

use super::{load_catalog, load_settings, read_profile};
use crate::cli::{ProfileArgs, ProjectArgs, ReportFormat};

pub async fn execute(
    project: ProjectArgs,
    profile: ProfileArgs,
    format: ReportFormat,
    output: Option<PathBuf>,
    provider: Option<ReportProvider>,
) -> anyhow::Result<()> {
    let profile = read_profile(&profile)?;
    let mut loaded = load_settings(&project)?;
    if let Some(provider) = provider {
        loaded.config.report.provider = provider;
    }

    let catalog = load_catalog(&loaded)?;
    let reporter = build_report_generator(&loaded.config.report)?;
    let service = ComplianceService::new(catalog, reporter);

    let report = service.report(&profile).await?;
    let content = match format {
        ReportFormat::Markdown => report.report.clone(),
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
    };

    match output {
        Some(path) => {
            atomic_write(&path, &content)?;
            info!(path = %path.display(), bytes = content.len(), "Report saved");
            println!(
                "✨ Report written to {} ({} requirements, generator: {})",
                path.display(),
                report.matched_requirements.len(),
                report.generator
            );
        }
        None => println!("{content}"),
    }
    Ok(())
}
