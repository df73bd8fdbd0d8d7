//! Closed-form time-value-of-money relationships
//!
//! All rates are per period and all period counts are in the same unit as the
//! rate. Period counts are `f64` so the solver can evaluate fractional terms.

use super::guards;
use crate::error::PlanningResult;

/// Rates this close to zero take the linear branch of the annuity formulas
pub(crate) const ZERO_RATE_EPSILON: f64 = 1e-12;

#[inline]
pub(crate) fn is_zero_rate(rate: f64) -> bool {
    rate.abs() < ZERO_RATE_EPSILON
}

/// Future value of a lump sum: `PV × (1 + r)^n`
///
/// # Example
/// ```
/// use retirement_planner::formulas::future_value;
///
/// let fv = future_value(10_000.0, 0.07, 10.0).unwrap();
/// assert!((fv - 19_671.51).abs() < 1.0);
/// ```
pub fn future_value(present_value: f64, rate: f64, periods: f64) -> PlanningResult<f64> {
    guards::non_negative("present_value", present_value)?;
    guards::non_negative("periods", periods)?;
    guards::rate("rate", rate)?;

    Ok(present_value * (1.0 + rate).powf(periods))
}

/// Present value of a lump sum: `FV / (1 + r)^n`
pub fn present_value(future_value: f64, rate: f64, periods: f64) -> PlanningResult<f64> {
    guards::non_negative("future_value", future_value)?;
    guards::non_negative("periods", periods)?;
    guards::rate("rate", rate)?;

    Ok(future_value / (1.0 + rate).powf(periods))
}

/// Future value of an ordinary annuity (payments at period end)
///
/// `PMT × [(1 + r)^n - 1] / r`, or `PMT × n` when the rate is zero.
pub fn future_value_of_annuity(payment: f64, rate: f64, periods: f64) -> PlanningResult<f64> {
    guards::non_negative("payment", payment)?;
    guards::non_negative("periods", periods)?;
    guards::rate("rate", rate)?;

    if is_zero_rate(rate) {
        return Ok(payment * periods);
    }

    Ok(payment * ((1.0 + rate).powf(periods) - 1.0) / rate)
}

/// Present value of an ordinary annuity
///
/// `PMT × [1 - (1 + r)^-n] / r`, or `PMT × n` when the rate is zero.
pub fn present_value_of_annuity(payment: f64, rate: f64, periods: f64) -> PlanningResult<f64> {
    guards::non_negative("payment", payment)?;
    guards::non_negative("periods", periods)?;
    guards::rate("rate", rate)?;

    if is_zero_rate(rate) {
        return Ok(payment * periods);
    }

    Ok(payment * (1.0 - (1.0 + rate).powf(-periods)) / rate)
}

/// Sinking-fund payment needed to accumulate `target` after `periods`
///
/// `FV × r / [(1 + r)^n - 1]`, or `FV / n` when the rate is zero.
pub fn payment_for_future_value(target: f64, rate: f64, periods: f64) -> PlanningResult<f64> {
    guards::non_negative("future_value", target)?;
    guards::positive("periods", periods)?;
    guards::rate("rate", rate)?;

    if is_zero_rate(rate) {
        return Ok(target / periods);
    }

    Ok(target * rate / ((1.0 + rate).powf(periods) - 1.0))
}

/// Level payment that fully amortizes `principal` over `periods`
///
/// `PV × r / [1 - (1 + r)^-n]`, or `PV / n` when the rate is zero.
pub fn payment_for_present_value(principal: f64, rate: f64, periods: f64) -> PlanningResult<f64> {
    guards::non_negative("present_value", principal)?;
    guards::positive("periods", periods)?;
    guards::rate("rate", rate)?;

    if is_zero_rate(rate) {
        return Ok(principal / periods);
    }

    Ok(principal * rate / (1.0 - (1.0 + rate).powf(-periods)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_future_value() {
        let fv = future_value(10_000.0, 0.07, 10.0).unwrap();
        assert!((fv - 19_671.51).abs() < 1.0, "got {}", fv);
    }

    #[test]
    fn test_present_value() {
        let pv = present_value(20_000.0, 0.07, 10.0).unwrap();
        assert!((pv - 10_162.67).abs() < 1.0, "got {}", pv);
    }

    #[test]
    fn test_round_trip_lump_sum() {
        for &(pv, rate, n) in &[(10_000.0, 0.06, 15.0), (1.0, -0.5, 3.0), (250.0, 0.0, 40.0)] {
            let fv = future_value(pv, rate, n).unwrap();
            assert_relative_eq!(present_value(fv, rate, n).unwrap(), pv, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_annuity_values() {
        let fv = future_value_of_annuity(1_000.0, 0.07, 10.0).unwrap();
        assert!((fv - 13_816.45).abs() < 1.0, "got {}", fv);

        let pv = present_value_of_annuity(1_000.0, 0.07, 10.0).unwrap();
        assert!((pv - 7_023.58).abs() < 1.0, "got {}", pv);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        assert_eq!(future_value_of_annuity(125.0, 0.0, 8.0).unwrap(), 1_000.0);
        assert_eq!(present_value_of_annuity(125.0, 0.0, 8.0).unwrap(), 1_000.0);
        assert_eq!(payment_for_future_value(1_000.0, 0.0, 8.0).unwrap(), 125.0);
        assert_eq!(payment_for_present_value(1_000.0, 0.0, 8.0).unwrap(), 125.0);
    }

    #[test]
    fn test_sinking_fund_inverts_annuity() {
        let pmt = payment_for_future_value(100_000.0, 0.07, 20.0).unwrap();
        assert!((pmt - 2_439.29).abs() < 0.01, "got {}", pmt);

        let fv = future_value_of_annuity(pmt, 0.07, 20.0).unwrap();
        assert_relative_eq!(fv, 100_000.0, max_relative = 1e-10);
    }

    #[test]
    fn test_loan_payment() {
        let pmt = payment_for_present_value(100_000.0, 0.05 / 12.0, 360.0).unwrap();
        assert!((pmt - 536.82).abs() < 0.01, "got {}", pmt);

        let pv = present_value_of_annuity(pmt, 0.05 / 12.0, 360.0).unwrap();
        assert_relative_eq!(pv, 100_000.0, max_relative = 1e-10);
    }

    #[test]
    fn test_invalid_inputs_name_the_argument() {
        let err = future_value(-1.0, 0.05, 1.0).unwrap_err();
        assert_eq!(err.parameter(), Some("present_value"));

        let err = present_value(100.0, -1.0, 1.0).unwrap_err();
        assert_eq!(err.parameter(), Some("rate"));

        let err = future_value_of_annuity(100.0, 0.05, -1.0).unwrap_err();
        assert_eq!(err.parameter(), Some("periods"));

        let err = payment_for_future_value(100.0, 0.05, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Some("periods"));

        let err = payment_for_present_value(100.0, -2.0, 12.0).unwrap_err();
        assert_eq!(err.parameter(), Some("rate"));
    }

    #[test]
    fn test_zero_periods() {
        assert_eq!(future_value(500.0, 0.1, 0.0).unwrap(), 500.0);
        assert_eq!(future_value_of_annuity(500.0, 0.1, 0.0).unwrap(), 0.0);
        assert_eq!(present_value_of_annuity(500.0, 0.1, 0.0).unwrap(), 0.0);
    }
}
