use crate::domain::catalog::{Catalog, DuplicatePolicy};
use crate::error::LicenseError;

/// Somewhere a requirement catalog can be loaded from.
///
/// Implementations must fail rather than hand back a partial or empty catalog.
pub trait CatalogSource: Send + Sync {
    fn load(&self, policy: DuplicatePolicy) -> Result<Catalog, LicenseError>;
}
