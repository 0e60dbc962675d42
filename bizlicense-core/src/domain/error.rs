// bizlicense-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid business profile: {field} {reason}")]
    #[diagnostic(
        code(bizlicense::domain::profile),
        help("area_m2 must be a positive number, seats a non-negative number, gas/serves_meat/deliveries booleans.")
    )]
    InvalidProfile { field: String, reason: String },

    #[error("Duplicate requirement id '{0}'")]
    #[diagnostic(
        code(bizlicense::domain::duplicate),
        help("Set `duplicate_policy` to first_wins or last_wins, or remove the duplicate entry.")
    )]
    DuplicateRequirement(String),

    #[error("Invalid requirement '{id}': {reason}")]
    #[diagnostic(code(bizlicense::domain::requirement))]
    InvalidRequirement { id: String, reason: String },
}

impl DomainError {
    pub fn invalid_profile(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::InvalidProfile {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_requirement(id: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::InvalidRequirement {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
