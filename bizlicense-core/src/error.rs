// bizlicense-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{CatalogLoadError, InfrastructureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LicenseError {
    // --- DOMAIN ERRORS (invalid profile, catalog invariants) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, templates, HTTP) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for LicenseError {
    fn from(err: std::io::Error) -> Self {
        LicenseError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<CatalogLoadError> for LicenseError {
    fn from(err: CatalogLoadError) -> Self {
        LicenseError::Infrastructure(InfrastructureError::Catalog(err))
    }
}

impl LicenseError {
    /// True when the caller supplied a profile the boundary must reject.
    pub fn is_invalid_profile(&self) -> bool {
        matches!(self, LicenseError::Domain(DomainError::InvalidProfile { .. }))
    }
}
