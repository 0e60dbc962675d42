// bizlicense/src/commands/mod.rs

pub mod catalog;
pub mod matching;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use bizlicense_core::domain::{BusinessProfile, Catalog};
use bizlicense_core::infrastructure::catalog::FileCatalogStore;
use bizlicense_core::infrastructure::config::{LoadedConfig, load_app_config, load_app_config_from};
use serde_json::json;
use tracing::debug;

use crate::cli::{ProfileArgs, ProjectArgs};

/// Configuration file (or defaults) with the command-line overrides applied on top.
pub fn load_settings(project: &ProjectArgs) -> anyhow::Result<LoadedConfig> {
    let mut loaded = match &project.config {
        Some(path) => load_app_config_from(path)?,
        None => load_app_config(&project.project_dir)?,
    };
    if let Some(catalog) = &project.catalog {
        loaded.config.catalog_path = catalog.to_string_lossy().into_owned();
        // Flag paths are relative to where the command runs
        if catalog.is_relative() {
            loaded.base_dir = PathBuf::from(".");
        }
    }
    if let Some(policy) = project.duplicate_policy {
        loaded.config.duplicate_policy = policy;
    }
    debug!(
        catalog = %loaded.catalog_path().display(),
        policy = %loaded.config.duplicate_policy,
        provider = ?loaded.config.report.provider,
        "Settings resolved"
    );
    Ok(loaded)
}

/// Loading failures are fatal; the diagnostic goes to stderr before bailing.
pub fn load_catalog(loaded: &LoadedConfig) -> anyhow::Result<Arc<Catalog>> {
    let store = FileCatalogStore::new(loaded.catalog_path());
    match store.load_catalog(loaded.config.duplicate_policy) {
        Ok(catalog) => Ok(Arc::new(catalog)),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            anyhow::bail!(
                "Requirement catalog could not be loaded from {}",
                store.path().display()
            )
        }
    }
}

/// Builds the profile from `--profile <file>` or from the individual flags.
/// Both paths go through the same boundary validation.
pub fn read_profile(args: &ProfileArgs) -> anyhow::Result<BusinessProfile> {
    let value = match &args.profile {
        Some(path) => read_profile_file(path)?,
        None => json!({
            "area_m2": args.area_m2,
            "seats": args.seats,
            "gas": args.gas,
            "serves_meat": args.serves_meat,
            "deliveries": args.deliveries,
        }),
    };
    let profile = BusinessProfile::from_value(&value)?;
    debug!(area_m2 = profile.area_m2, seats = profile.seats, "Profile accepted");
    Ok(profile)
}

fn read_profile_file(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read profile file {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let value = if is_yaml {
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .with_context(|| format!("Malformed YAML in {}", path.display()))?;
        serde_json::to_value(yaml)?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed JSON in {}", path.display()))?
    };
    Ok(value)
}
