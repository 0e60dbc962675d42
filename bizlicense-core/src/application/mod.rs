// bizlicense-core/src/application/mod.rs

pub mod service;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use bizlicense_core::application::{ComplianceService, ComplianceReport};`
pub use service::{ComplianceReport, ComplianceService, MatchResponse};
