use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Isolated project directory with the fixture catalog and a config file.
struct BizlicenseTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl BizlicenseTestEnv {
    fn new(config: &str) -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();

        std::fs::create_dir_all(root.join("data"))?;
        std::fs::copy(fixture("catalog.yaml"), root.join("data/catalog.yaml"))?;
        std::fs::copy(fixture("meat_shop.yaml"), root.join("meat_shop.yaml"))?;
        std::fs::write(root.join("bizlicense.yaml"), config)?;

        Ok(Self { _tmp: tmp, root })
    }

    fn bizlicense(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bizlicense"));
        cmd.current_dir(&self.root);
        for var in [
            "BIZLICENSE_CATALOG_PATH",
            "BIZLICENSE_DUPLICATE_POLICY",
            "BIZLICENSE_REPORT_PROVIDER",
            "BIZLICENSE_MODEL",
            "BIZLICENSE_BASE_URL",
            "OPENAI_API_KEY",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn bundled_catalog() -> Result<PathBuf> {
    Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .context("Workspace root not found")?
        .join("data/requirements.json"))
}

const CONFIG: &str = "catalog_path: data/catalog.yaml\n";

fn matched_ids(stdout: &[u8]) -> Result<Vec<String>> {
    let json: serde_json::Value = serde_json::from_slice(stdout)?;
    Ok(json["matched_requirements"]
        .as_array()
        .context("matched_requirements is not an array")?
        .iter()
        .filter_map(|r| r["id"].as_str().map(str::to_string))
        .collect())
}

#[test]
fn test_match_json_keeps_catalog_order() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    let out = env
        .bizlicense()
        .args(["match", "--area-m2", "60", "--serves-meat", "--format", "json"])
        .output()?;
    assert!(out.status.success());

    assert_eq!(
        matched_ids(&out.stdout)?,
        ["license_basic", "fire_safety", "food_service", "water_quality"]
    );
    let json: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(json["business_input"]["serves_meat"], true);
    assert!(json["business_input"].get("serves_food").is_none());
    Ok(())
}

#[test]
fn test_match_profile_file() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    let out = env
        .bizlicense()
        .args(["match", "--profile", "meat_shop.yaml", "--format", "json"])
        .output()?;
    assert!(out.status.success());
    assert_eq!(
        matched_ids(&out.stdout)?,
        ["license_basic", "food_service", "water_quality"]
    );
    Ok(())
}

#[test]
fn test_match_accepts_fractional_seat_count() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    std::fs::write(
        env.root.join("cafe.json"),
        r#"{ "area_m2": 30, "seats": 12.0, "gas": false, "serves_meat": false, "deliveries": false }"#,
    )?;
    let out = env
        .bizlicense()
        .args(["match", "--profile", "cafe.json", "--format", "json"])
        .output()?;
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(json["business_input"]["seats"], 12.0);
    assert_eq!(matched_ids(&out.stdout)?, ["license_basic"]);
    Ok(())
}

#[test]
fn test_last_wins_policy_from_flag() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    // The revised fire_safety entry needs 70 m²
    let out = env
        .bizlicense()
        .args([
            "match",
            "--area-m2",
            "60",
            "--duplicate-policy",
            "last-wins",
            "--format",
            "json",
        ])
        .output()?;
    assert!(out.status.success());
    assert_eq!(matched_ids(&out.stdout)?, ["license_basic"]);
    Ok(())
}

#[test]
fn test_reject_policy_fails_to_load() -> Result<()> {
    let env = BizlicenseTestEnv::new("catalog_path: data/catalog.yaml\nduplicate_policy: reject\n")?;
    env.bizlicense()
        .args(["catalog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be loaded"));
    Ok(())
}

#[test]
fn test_invalid_area_names_field() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    env.bizlicense()
        .args(["match", "--area-m2", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("area_m2"));
    Ok(())
}

#[test]
fn test_missing_catalog_is_fatal() -> Result<()> {
    let env = BizlicenseTestEnv::new("catalog_path: data/nowhere.json\n")?;
    env.bizlicense()
        .args(["match", "--area-m2", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be loaded"));
    Ok(())
}

#[test]
fn test_match_table_output() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    env.bizlicense()
        .args(["match", "--area-m2", "55"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fire_safety"))
        .stdout(predicate::str::contains("2 of 4 requirements apply"));
    Ok(())
}

#[test]
fn test_catalog_summary_json() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    let out = env
        .bizlicense()
        .args(["catalog", "--format", "json"])
        .output()?;
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(json["requirements_count"], 4);
    assert_eq!(json["mandatory"], 3);
    assert_eq!(json["recommended"], 1);
    assert_eq!(json["optional"], 0);
    Ok(())
}

#[test]
fn test_report_markdown_to_stdout() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    env.bizlicense()
        .args(["report", "--area-m2", "50", "--seats", "10"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Business Licensing Report"))
        .stdout(predicate::str::contains("### Fire safety approval"))
        .stdout(predicate::str::contains("## Mandatory requirements (2)"));
    Ok(())
}

#[test]
fn test_report_written_to_file() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    env.bizlicense()
        .args(["report", "--area-m2", "30", "--output", "out/report.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let text = std::fs::read_to_string(env.root.join("out/report.md"))?;
    assert!(text.contains("### Basic business license"));
    assert!(!text.contains("### Fire safety approval"));
    Ok(())
}

#[test]
fn test_llm_provider_without_key_falls_back() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    let out = env
        .bizlicense()
        .args([
            "report",
            "--area-m2",
            "20",
            "--serves-meat",
            "--provider",
            "llm",
            "--format",
            "json",
        ])
        .output()?;
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(json["generator"], "template");
    assert_eq!(json["matched_requirements"].as_array().map(Vec::len), Some(3));
    assert!(json["generated_at"].is_string());
    Ok(())
}

#[test]
fn test_bundled_catalog_scenarios() -> Result<()> {
    let env = BizlicenseTestEnv::new(CONFIG)?;
    let catalog = bundled_catalog()?;
    let catalog = catalog.to_string_lossy();

    let at_50 = env
        .bizlicense()
        .args(["match", "--catalog", &catalog, "--area-m2", "50", "--format", "json"])
        .output()?;
    assert!(at_50.status.success());
    assert_eq!(
        matched_ids(&at_50.stdout)?,
        ["license_basic", "fire_safety", "accessibility", "signage_permit"]
    );

    let below = env
        .bizlicense()
        .args(["match", "--catalog", &catalog, "--area-m2", "49.999", "--format", "json"])
        .output()?;
    assert!(below.status.success());
    assert!(!matched_ids(&below.stdout)?.contains(&"fire_safety".to_string()));

    let meat = env
        .bizlicense()
        .args(["match", "--catalog", &catalog, "--area-m2", "10", "--serves-meat", "--format", "json"])
        .output()?;
    assert!(meat.status.success());
    assert_eq!(
        matched_ids(&meat.stdout)?,
        [
            "license_basic",
            "food_service",
            "meat_handling",
            "water_quality",
            "kashrut_supervision"
        ]
    );
    Ok(())
}
