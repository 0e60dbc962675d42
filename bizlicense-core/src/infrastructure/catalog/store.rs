// bizlicense-core/src/infrastructure/catalog/store.rs

// Reads the persisted requirement catalog: a single JSON/YAML file holding a
// list of records, or a directory of such files merged in path order.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::domain::ports::CatalogSource;
use crate::domain::{Catalog, DuplicatePolicy, RequirementRecord};
use crate::error::LicenseError;
use crate::infrastructure::error::CatalogLoadError;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the whole catalog, failing on the first problem.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load_catalog(&self, policy: DuplicatePolicy) -> Result<Catalog, CatalogLoadError> {
        if !self.path.exists() {
            return Err(CatalogLoadError::NotFound(self.path.clone()));
        }

        let files = if self.path.is_dir() {
            discover_files(&self.path)?
        } else {
            vec![self.path.clone()]
        };

        let mut records = Vec::new();
        for file in &files {
            let mut batch = read_records(file)?;
            debug!(file = %file.display(), count = batch.len(), "Read catalog fragment");
            records.append(&mut batch);
        }

        if records.is_empty() {
            return Err(CatalogLoadError::Empty(self.path.clone()));
        }

        let catalog = Catalog::build(records, policy)?;
        info!(
            requirements = catalog.len(),
            files = files.len(),
            policy = %policy,
            "Loaded requirement catalog"
        );
        Ok(catalog)
    }
}

impl CatalogSource for FileCatalogStore {
    fn load(&self, policy: DuplicatePolicy) -> Result<Catalog, LicenseError> {
        Ok(self.load_catalog(policy)?)
    }
}

fn discover_files(root: &Path) -> Result<Vec<PathBuf>, CatalogLoadError> {
    let mut files = Vec::new();

    // Sorted walk: merge order (and so duplicate resolution) is stable across runs
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| CatalogLoadError::Unreadable {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source: e.into(),
        })?;
        let path = entry.path();
        if path.is_file() && has_supported_extension(path) {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(CatalogLoadError::Empty(root.to_path_buf()));
    }
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn read_records(path: &Path) -> Result<Vec<RequirementRecord>, CatalogLoadError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| CatalogLoadError::UnsupportedFormat(path.to_path_buf()))?;

    let content = fs::read_to_string(path).map_err(|source| CatalogLoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    match ext.as_str() {
        "json" => serde_json::from_str(&content).map_err(|source| CatalogLoadError::MalformedJson {
            path: path.to_path_buf(),
            source,
        }),
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|source| CatalogLoadError::MalformedYaml {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Err(CatalogLoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::RequirementLevel;
    use anyhow::Result;
    use tempfile::tempdir;

    const TWO_RECORDS: &str = r#"[
        {
            "id": "license_basic",
            "title": "Basic business license",
            "level": "mandatory",
            "applies_if": { "area_m2": { "min": 1 } },
            "summary": "General business license required for every business",
            "authority": "Local Authority",
            "source_ref": "guide.pdf"
        },
        {
            "id": "fire_safety",
            "title": "Fire safety approval",
            "level": "mandatory",
            "applies_if": { "area_m2": { "min": 50 } },
            "summary": "Fire safety and extinguishing systems approval",
            "authority": "Fire and Rescue Authority",
            "source_ref": "guide.pdf"
        }
    ]"#;

    #[test]
    fn test_load_json_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.json");
        fs::write(&path, TWO_RECORDS)?;

        let catalog = FileCatalogStore::new(&path).load_catalog(DuplicatePolicy::FirstWins)?;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[1].id, "fire_safety");
        Ok(())
    }

    #[test]
    fn test_load_yaml_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.yaml");
        fs::write(
            &path,
            "- id: kashrut\n  title: Kashrut supervision\n  level: optional\n  applies_if:\n    serves_food: true\n  summary: Kashrut certificate\n  authority: Local Rabbinate\n  source_ref: guide.pdf\n",
        )?;

        let catalog = FileCatalogStore::new(&path).load_catalog(DuplicatePolicy::FirstWins)?;
        let record = catalog.get("kashrut").unwrap();
        assert_eq!(record.level, RequirementLevel::Optional);
        assert_eq!(record.applies_if.serves_food, Some(true));
        Ok(())
    }

    #[test]
    fn test_missing_store_is_fatal() {
        let err = FileCatalogStore::new("/nope/requirements.json")
            .load_catalog(DuplicatePolicy::FirstWins)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::NotFound(_)));
    }

    #[test]
    fn test_malformed_json_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.json");
        fs::write(&path, r#"[{ "id": "x", "title": "#)?;

        let err = FileCatalogStore::new(&path)
            .load_catalog(DuplicatePolicy::FirstWins)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::MalformedJson { .. }));
        Ok(())
    }

    #[test]
    fn test_schema_violation_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.json");
        // "critical" is not a level
        fs::write(
            &path,
            r#"[{ "id": "x", "title": "X", "level": "critical", "summary": "S", "authority": "A", "source_ref": "R" }]"#,
        )?;

        let err = FileCatalogStore::new(&path)
            .load_catalog(DuplicatePolicy::FirstWins)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::MalformedJson { .. }));
        Ok(())
    }

    #[test]
    fn test_record_without_summary_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.yaml");
        fs::write(
            &path,
            "- id: x\n  title: X\n  level: optional\n  authority: A\n  source_ref: R\n",
        )?;

        let err = FileCatalogStore::new(&path)
            .load_catalog(DuplicatePolicy::FirstWins)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::MalformedYaml { .. }));
        Ok(())
    }

    #[test]
    fn test_inverted_bounds_are_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.json");
        fs::write(
            &path,
            r#"[{ "id": "x", "title": "X", "level": "optional", "summary": "S",
                  "authority": "A", "source_ref": "R",
                  "applies_if": { "seats": { "min": 30, "max": 10 } } }]"#,
        )?;

        let err = FileCatalogStore::new(&path)
            .load_catalog(DuplicatePolicy::FirstWins)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::Invalid(_)));
        Ok(())
    }

    #[test]
    fn test_empty_catalog_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.json");
        fs::write(&path, "[]")?;

        let err = FileCatalogStore::new(&path)
            .load_catalog(DuplicatePolicy::FirstWins)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::Empty(_)));
        Ok(())
    }

    #[test]
    fn test_unsupported_extension_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.csv");
        fs::write(&path, "id,title")?;

        let err = FileCatalogStore::new(&path)
            .load_catalog(DuplicatePolicy::FirstWins)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::UnsupportedFormat(_)));
        Ok(())
    }

    #[test]
    fn test_directory_merges_in_path_order() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("10-base.json"), TWO_RECORDS)?;
        fs::write(
            dir.path().join("20-overrides.yaml"),
            "- id: fire_safety\n  title: Fire safety approval (2026 revision)\n  level: mandatory\n  applies_if:\n    area_m2:\n      min: 40\n  summary: Revised fire plan\n  authority: Fire and Rescue Authority\n  source_ref: circular-2026.pdf\n- id: signage\n  title: Signage permit\n  level: optional\n  summary: Exterior signs\n  authority: Local Authority\n  source_ref: guide.pdf\n",
        )?;
        fs::write(dir.path().join("README.txt"), "ignored")?;

        let store = FileCatalogStore::new(dir.path());

        let first = store.load_catalog(DuplicatePolicy::FirstWins)?;
        let ids: Vec<&str> = first.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["license_basic", "fire_safety", "signage"]);
        assert_eq!(first.get("fire_safety").unwrap().source_ref, "guide.pdf");

        let last = store.load_catalog(DuplicatePolicy::LastWins)?;
        assert_eq!(last.get("fire_safety").unwrap().source_ref, "circular-2026.pdf");
        assert_eq!(last.records()[1].id, "fire_safety");

        let rejected = store.load_catalog(DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(rejected, CatalogLoadError::Invalid(_)));
        Ok(())
    }

    #[test]
    fn test_directory_without_catalog_files_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("notes.md"), "nothing here")?;

        let err = FileCatalogStore::new(dir.path())
            .load_catalog(DuplicatePolicy::FirstWins)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::Empty(_)));
        Ok(())
    }

    #[test]
    fn test_catalog_source_port() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("requirements.json");
        fs::write(&path, TWO_RECORDS)?;

        let source: Box<dyn CatalogSource> = Box::new(FileCatalogStore::new(&path));
        assert_eq!(source.load(DuplicatePolicy::FirstWins)?.len(), 2);

        let missing: Box<dyn CatalogSource> = Box::new(FileCatalogStore::new(dir.path().join("x.json")));
        assert!(missing.load(DuplicatePolicy::FirstWins).is_err());
        Ok(())
    }
}
