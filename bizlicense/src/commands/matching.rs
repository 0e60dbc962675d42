// bizlicense/src/commands/matching.rs
//
// USE CASE: List the requirements that apply to one business profile.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use tracing::info;

use bizlicense_core::application::MatchResponse;

use super::{load_catalog, load_settings, read_profile};
use crate::cli::{OutputFormat, ProfileArgs, ProjectArgs};

pub fn execute(project: ProjectArgs, profile: ProfileArgs, format: OutputFormat) -> anyhow::Result<()> {
    let profile = read_profile(&profile)?;
    let loaded = load_settings(&project)?;
    let catalog = load_catalog(&loaded)?;

    let response = MatchResponse::evaluate(&profile, &catalog)?;
    info!(matched = response.matched_requirements.len(), "Profile matched");

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "Title", "Level", "Authority"]);
            for record in &response.matched_requirements {
                table.add_row(vec![
                    record.id.as_str(),
                    record.title.as_str(),
                    record.level.as_str(),
                    record.authority.as_str(),
                ]);
            }
            println!("{table}");
            println!(
                "✅ {} of {} requirements apply",
                response.matched_requirements.len(),
                catalog.len()
            );
        }
    }
    Ok(())
}
