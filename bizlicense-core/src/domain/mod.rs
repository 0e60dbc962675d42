pub mod catalog;
pub mod error;
pub mod matcher;
pub mod ports;
pub mod predicate;
pub mod profile;
pub mod requirement;

// Handy re-exports to keep imports short elsewhere
pub use catalog::{Catalog, CatalogSummary, DuplicatePolicy};
pub use error::DomainError;
pub use matcher::{MatchResult, match_requirements};
pub use predicate::{ApplicabilityPredicate, Bounds};
pub use profile::{BusinessProfile, EffectiveProfile};
pub use requirement::{RequirementLevel, RequirementRecord};
