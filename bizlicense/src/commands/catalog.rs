// bizlicense/src/commands/catalog.rs
//
// USE CASE: Load the catalog (fail-fast) and print its summary.

use comfy_table::{Table, presets::UTF8_FULL};
use tracing::info;

use super::{load_catalog, load_settings};
use crate::cli::{OutputFormat, ProjectArgs};

pub fn execute(project: ProjectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let loaded = load_settings(&project)?;
    let catalog = load_catalog(&loaded)?;
    let summary = catalog.summary();
    info!(requirements = summary.requirements_count, "Catalog summarized");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec!["Level", "Count"]);
            table.add_row(vec!["mandatory".to_string(), summary.mandatory.to_string()]);
            table.add_row(vec!["recommended".to_string(), summary.recommended.to_string()]);
            table.add_row(vec!["optional".to_string(), summary.optional.to_string()]);
            println!("📚 Catalog: {}", loaded.catalog_path().display());
            println!("{table}");
            println!("   Requirements: {}", summary.requirements_count);
        }
    }
    Ok(())
}
