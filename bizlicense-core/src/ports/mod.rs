// bizlicense-core/src/ports/mod.rs

pub mod report;

pub use report::{GeneratedReport, ReportGenerator};
