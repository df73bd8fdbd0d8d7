//! Rules of thumb and rate conversions

use super::guards;
use crate::error::{PlanningError, PlanningResult};

/// Approximate years to double at `rate` using the rule of 72
pub fn rule_of_72(rate: f64) -> PlanningResult<f64> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(PlanningError::invalid("rate", "must be positive", rate));
    }
    Ok(0.72 / rate)
}

/// Real return after inflation: `(1 + nominal) / (1 + inflation) - 1`
///
/// Negative real returns are valid output.
pub fn inflation_adjusted_return(nominal: f64, inflation: f64) -> PlanningResult<f64> {
    guards::rate("nominal_return", nominal)?;
    guards::rate("inflation_rate", inflation)?;

    Ok((1.0 + nominal) / (1.0 + inflation) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_of_72() {
        assert!((rule_of_72(0.08).unwrap() - 9.0).abs() < 1e-12);
        assert!(rule_of_72(0.0).is_err());
        assert!(rule_of_72(-0.02).is_err());
    }

    #[test]
    fn test_inflation_adjusted_return() {
        let real = inflation_adjusted_return(0.07, 0.03).unwrap();
        assert!((real - (1.07 / 1.03 - 1.0)).abs() < 1e-12);

        assert!(inflation_adjusted_return(0.05, 0.05).unwrap().abs() < 1e-12);
        assert!(inflation_adjusted_return(0.02, 0.05).unwrap() < 0.0);
    }

    #[test]
    fn test_inflation_rate_guard() {
        let err = inflation_adjusted_return(0.05, -1.0).unwrap_err();
        assert_eq!(err.parameter(), Some("inflation_rate"));
    }
}
