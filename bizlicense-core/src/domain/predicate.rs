// bizlicense-core/src/domain/predicate.rs

use serde::{Deserialize, Serialize};

use crate::domain::profile::EffectiveProfile;

/// Inclusive range. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn at_least(min: T) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: T) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, value: T) -> bool {
        if let Some(min) = self.min
            && value < min
        {
            return false;
        }
        if let Some(max) = self.max
            && value > max
        {
            return false;
        }
        true
    }

    fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Conjunctive applicability rule attached to a requirement.
///
/// Every present field must hold; absent fields impose nothing. Boolean
/// fields are equality tests, so `gas: false` excludes gas installations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicabilityPredicate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<Bounds<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<Bounds<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_meat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_food: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliveries: Option<bool>,
}

impl ApplicabilityPredicate {
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_satisfied_by(&self, profile: &EffectiveProfile) -> bool {
        if let Some(area) = self.area_m2
            && !area.contains(profile.area_m2)
        {
            return false;
        }
        if let Some(seats) = self.seats
            && !seats.contains(profile.seats)
        {
            return false;
        }

        flag_holds(self.gas, profile.gas)
            && flag_holds(self.serves_meat, profile.serves_meat)
            && flag_holds(self.serves_food, profile.serves_food)
            && flag_holds(self.deliveries, profile.deliveries)
    }

    /// Shape checks that serde cannot express. Run once at catalog load.
    pub fn check(&self) -> Result<(), String> {
        if let Some(area) = self.area_m2 {
            check_bounds("area_m2", area)?;
        }
        if let Some(seats) = self.seats {
            check_bounds("seats", seats)?;
        }
        Ok(())
    }
}

fn check_bounds(name: &str, bounds: Bounds<f64>) -> Result<(), String> {
    for bound in [bounds.min, bounds.max].into_iter().flatten() {
        if !bound.is_finite() || bound < 0.0 {
            return Err(format!(
                "{} bound {} must be a finite non-negative number",
                name, bound
            ));
        }
    }
    if bounds.is_inverted() {
        return Err(format!("{name}.min is greater than {name}.max"));
    }
    Ok(())
}

fn flag_holds(expected: Option<bool>, actual: bool) -> bool {
    expected.is_none_or(|e| e == actual)
}
