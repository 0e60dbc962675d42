// bizlicense-core/src/lib.rs

// 1. Documentation is encouraged but not enforced yet
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts the application needs (report generation).
pub mod ports;

// 2. Domain (business core)
// Profiles, requirement records, predicates, catalog, matcher.
// Depends on nothing else (no infra, no app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Catalog files, configuration, templates, LLM client.
// Depends on the Domain and the Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Validation -> Matching -> Reporting.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use bizlicense_core::{LicenseError, Catalog, BusinessProfile, match_requirements};
pub use domain::{BusinessProfile, Catalog, MatchResult, RequirementRecord, match_requirements};
pub use error::LicenseError;
