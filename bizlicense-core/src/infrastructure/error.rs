// bizlicense-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::error::DomainError;

/// Startup-time catalog failures. Always fatal: nothing serves on a partial catalog.
#[derive(Error, Debug, Diagnostic)]
pub enum CatalogLoadError {
    #[error("Requirement catalog not found at {0:?}")]
    #[diagnostic(
        code(bizlicense::catalog::not_found),
        help("Check `catalog_path` in bizlicense.yaml or BIZLICENSE_CATALOG_PATH.")
    )]
    NotFound(PathBuf),

    #[error("Could not read requirement catalog {path:?}: {source}")]
    #[diagnostic(code(bizlicense::catalog::io))]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in catalog {path:?}: {source}")]
    #[diagnostic(
        code(bizlicense::catalog::json),
        help("The catalog must be a list of requirement records (id, title, level, summary, authority, source_ref, applies_if).")
    )]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed YAML in catalog {path:?}: {source}")]
    #[diagnostic(
        code(bizlicense::catalog::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    MalformedYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported catalog format {0:?}")]
    #[diagnostic(
        code(bizlicense::catalog::format),
        help("Use a .json, .yaml or .yml file, or a directory containing them.")
    )]
    UnsupportedFormat(PathBuf),

    #[error("Requirement catalog at {0:?} contains no requirements")]
    #[diagnostic(code(bizlicense::catalog::empty))]
    Empty(PathBuf),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] DomainError),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- CATALOG ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogLoadError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(bizlicense::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML / JSON ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(bizlicense::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Error: {0}")]
    #[diagnostic(code(bizlicense::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(bizlicense::infra::config))]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(bizlicense::infra::config_missing))]
    ConfigNotFound(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(bizlicense::infra::template),
        help("Check the Jinja syntax ({{ ... }}) of the report template.")
    )]
    TemplateError(#[from] minijinja::Error),

    // --- LLM / HTTP ---
    #[error("HTTP Error: {0}")]
    #[diagnostic(code(bizlicense::infra::http))]
    Http(#[from] reqwest::Error),

    #[error("Language model returned an unusable response: {0}")]
    #[diagnostic(code(bizlicense::infra::llm))]
    LlmResponse(String),
}
