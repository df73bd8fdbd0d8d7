//! Argument checks shared by every calculation
//!
//! Each guard returns the value on success so call sites read as a list of
//! preconditions. NaN and infinities are rejected everywhere.

use crate::error::{PlanningError, PlanningResult};

pub(crate) fn non_negative(parameter: &'static str, value: f64) -> PlanningResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlanningError::invalid(parameter, "must be a finite, non-negative amount", value));
    }
    Ok(value)
}

pub(crate) fn positive(parameter: &'static str, value: f64) -> PlanningResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PlanningError::invalid(parameter, "must be finite and greater than zero", value));
    }
    Ok(value)
}

/// A periodic rate must exceed -100%, otherwise `1 + rate` is not positive
pub(crate) fn rate(parameter: &'static str, value: f64) -> PlanningResult<f64> {
    if !value.is_finite() || value <= -1.0 {
        return Err(PlanningError::invalid(parameter, "must be greater than -1 (-100%)", value));
    }
    Ok(value)
}

pub(crate) fn fraction(parameter: &'static str, value: f64) -> PlanningResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(PlanningError::invalid(parameter, "must be between 0 and 1", value));
    }
    Ok(value)
}

pub(crate) fn within(
    parameter: &'static str,
    constraint: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> PlanningResult<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(PlanningError::invalid(parameter, constraint, value));
    }
    Ok(value)
}
