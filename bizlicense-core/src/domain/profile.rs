// bizlicense-core/src/domain/profile.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::error::DomainError;

/// Business attributes supplied by the caller, one per request.
///
/// `serves_food` is never asked from the user. It may be present when a
/// profile is replayed from a previous response, and it is only ever read
/// through [`BusinessProfile::effective`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BusinessProfile {
    #[validate(
        custom(function = "validate_finite"),
        range(exclusive_min = 0.0, message = "must be a positive number")
    )]
    pub area_m2: f64,
    #[validate(
        custom(function = "validate_finite"),
        range(min = 0.0, message = "must be a non-negative number")
    )]
    pub seats: f64,
    pub gas: bool,
    pub serves_meat: bool,
    pub deliveries: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_food: Option<bool>,
}

/// The profile as seen by the matcher, after derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveProfile {
    pub area_m2: f64,
    pub seats: f64,
    pub gas: bool,
    pub serves_meat: bool,
    pub serves_food: bool,
    pub deliveries: bool,
}

impl BusinessProfile {
    pub fn new(area_m2: f64, seats: f64, gas: bool, serves_meat: bool, deliveries: bool) -> Self {
        Self {
            area_m2,
            seats,
            gas,
            serves_meat,
            deliveries,
            serves_food: None,
        }
    }

    /// Meat service implies food service. The caller's profile is left untouched.
    pub fn effective(&self) -> EffectiveProfile {
        EffectiveProfile {
            area_m2: self.area_m2,
            seats: self.seats,
            gas: self.gas,
            serves_meat: self.serves_meat,
            serves_food: self.serves_food.unwrap_or(false) || self.serves_meat,
            deliveries: self.deliveries,
        }
    }

    /// Boundary validation. The matcher assumes this already passed.
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(first_violation)
    }

    /// Builds a profile from loosely typed input, naming the first field that
    /// does not fit. Fields are checked in declaration order.
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DomainError::invalid_profile("profile", "must be an object"))?;

        let area_m2 = obj
            .get("area_m2")
            .and_then(Value::as_f64)
            .ok_or_else(|| DomainError::invalid_profile("area_m2", "must be a positive number"))?;

        // Any number is accepted here (12, 12.0, 2.5); range and finiteness
        // are left to `check` so both paths report the same reason.
        let seats = obj
            .get("seats")
            .and_then(Value::as_f64)
            .ok_or_else(|| DomainError::invalid_profile("seats", "must be a non-negative number"))?;

        let flag = |name: &str| -> Result<bool, DomainError> {
            obj.get(name)
                .and_then(Value::as_bool)
                .ok_or_else(|| DomainError::invalid_profile(name, "must be a boolean"))
        };

        let gas = flag("gas")?;
        let serves_meat = flag("serves_meat")?;
        let deliveries = flag("deliveries")?;

        let serves_food = match obj.get("serves_food") {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => return Err(DomainError::invalid_profile("serves_food", "must be a boolean")),
        };

        let profile = Self {
            area_m2,
            seats,
            gas,
            serves_meat,
            deliveries,
            serves_food,
        };
        profile.check()?;
        Ok(profile)
    }
}

fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite").with_message("must be a finite number".into()))
    }
}

fn first_violation(errors: ValidationErrors) -> DomainError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    match fields.first() {
        Some((field, errs)) => {
            let reason = errs
                .first()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("failed '{}' check", e.code),
                })
                .unwrap_or_else(|| "is invalid".to_string());
            DomainError::invalid_profile(field.to_string(), reason)
        }
        None => DomainError::invalid_profile("profile", "is invalid"),
    }
}
