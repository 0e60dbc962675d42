// bizlicense-core/src/infrastructure/config/app.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::DuplicatePolicy;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["bizlicense.yaml", "bizlicense_conf.yaml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            duplicate_policy: DuplicatePolicy::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportProvider {
    /// Deterministic markdown template, no network.
    #[default]
    Template,
    /// OpenAI-compatible chat completion, template as fallback.
    Llm,
}

impl ReportProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Llm => "llm",
        }
    }
}

impl fmt::Display for ReportProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "template" | "mock" => Ok(Self::Template),
            "llm" | "openai" => Ok(Self::Llm),
            _ => Err(format!("Unknown report provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub provider: ReportProvider,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key (never the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            provider: ReportProvider::default(),
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_catalog_path() -> String {
    "data/requirements.json".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_max_attempts() -> u32 {
    3
}
fn default_timeout_secs() -> u64 {
    60
}

/// A loaded configuration plus the directory relative paths resolve against.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub base_dir: PathBuf,
}

impl LoadedConfig {
    pub fn catalog_path(&self) -> PathBuf {
        let path = Path::new(&self.config.catalog_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

// --- LOADERS ---

/// Looks for `bizlicense.yaml` (then `bizlicense_conf.yaml`) in `project_dir`.
/// Without either file the defaults apply. Environment overrides come last.
#[instrument(skip(project_dir))]
pub fn load_app_config(project_dir: &Path) -> Result<LoadedConfig, InfrastructureError> {
    let config = match find_config(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading configuration");
            read_config(&path)?
        }
        None => {
            info!(dir = ?project_dir, "No configuration file found, using defaults");
            AppConfig::default()
        }
    };

    finish(config, project_dir.to_path_buf())
}

/// Loads an explicitly named configuration file. A missing file is an error.
#[instrument]
pub fn load_app_config_from(path: &Path) -> Result<LoadedConfig, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }
    info!(path = ?path, "Loading configuration");
    let config = read_config(path)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    finish(config, base_dir)
}

fn finish(mut config: AppConfig, base_dir: PathBuf) -> Result<LoadedConfig, InfrastructureError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(LoadedConfig { config, base_dir })
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn read_config(path: &Path) -> Result<AppConfig, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    if config.report.max_attempts == 0 {
        return Err(InfrastructureError::ConfigError(
            "report.max_attempts must be at least 1".to_string(),
        ));
    }
    Ok(config)
}

/// Layering: `BIZLICENSE_*` variables win over the file.
/// The lookup is injected so the rules can be exercised without touching the process env.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("BIZLICENSE_CATALOG_PATH") {
        info!(old = ?config.catalog_path, new = ?val, "Overriding catalog path via ENV");
        config.catalog_path = val;
    }
    if let Some(val) = lookup("BIZLICENSE_DUPLICATE_POLICY") {
        config.duplicate_policy = val.parse().map_err(InfrastructureError::ConfigError)?;
        info!(policy = %config.duplicate_policy, "Overriding duplicate policy via ENV");
    }
    if let Some(val) = lookup("BIZLICENSE_REPORT_PROVIDER") {
        config.report.provider = val.parse().map_err(InfrastructureError::ConfigError)?;
        info!(provider = %config.report.provider, "Overriding report provider via ENV");
    }
    if let Some(val) = lookup("BIZLICENSE_MODEL") {
        info!(old = ?config.report.model, new = ?val, "Overriding model via ENV");
        config.report.model = val;
    }
    if let Some(val) = lookup("BIZLICENSE_BASE_URL") {
        info!(old = ?config.report.base_url, new = ?val, "Overriding LLM base URL via ENV");
        config.report.base_url = val;
    }
    Ok(())
}
