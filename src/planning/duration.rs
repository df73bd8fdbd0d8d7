//! How long a balance lasts under level withdrawals

use log::debug;

use crate::error::PlanningResult;
use crate::formulas::{guards, is_zero_rate};
use crate::outcome::Outcome;

/// Years a balance supports an annual withdrawal before it is exhausted
///
/// Inverts the present value of an annuity for `n`:
/// `n = -ln(1 - S·r/W) / ln(1 + r)`. When the withdrawal does not exceed the
/// return earned on the balance the answer is [`Outcome::Indefinite`].
pub fn savings_duration(current_savings: f64, annual_withdrawal: f64, annual_return: f64) -> PlanningResult<Outcome<f64>> {
    guards::positive("current_savings", current_savings)?;
    guards::positive("annual_withdrawal", annual_withdrawal)?;
    guards::rate("annual_return", annual_return)?;

    if annual_withdrawal <= current_savings * annual_return {
        debug!("withdrawal {} covered by returns, balance never shrinks", annual_withdrawal);
        return Ok(Outcome::Indefinite);
    }

    if is_zero_rate(annual_return) {
        return Ok(Outcome::Finite(current_savings / annual_withdrawal));
    }

    let ratio = current_savings * annual_return / annual_withdrawal;
    if ratio >= 1.0 {
        return Ok(Outcome::Indefinite);
    }

    Ok(Outcome::Finite(-(1.0 - ratio).ln() / (1.0 + annual_return).ln()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::present_value_of_annuity;

    #[test]
    fn test_reference_drawdown() {
        let years = savings_duration(500_000.0, 40_000.0, 0.04).unwrap().finite().unwrap();
        assert!(years > 15.0 && years < 20.0, "got {}", years);
        assert!((years - 17.67).abs() < 0.01);
    }

    #[test]
    fn test_duration_inverts_annuity_present_value() {
        let years = savings_duration(300_000.0, 25_000.0, 0.05).unwrap().finite().unwrap();
        let pv = present_value_of_annuity(25_000.0, 0.05, years).unwrap();
        assert!((pv - 300_000.0).abs() < 1e-4);
    }

    #[test]
    fn test_withdrawal_covered_by_returns() {
        assert_eq!(savings_duration(1_000_000.0, 40_000.0, 0.04).unwrap(), Outcome::Indefinite);
        assert_eq!(savings_duration(1_000_000.0, 30_000.0, 0.05).unwrap(), Outcome::Indefinite);
    }

    #[test]
    fn test_zero_return() {
        assert_eq!(savings_duration(100_000.0, 10_000.0, 0.0).unwrap(), Outcome::Finite(10.0));
    }

    #[test]
    fn test_negative_return_shortens_duration() {
        let flat = savings_duration(100_000.0, 10_000.0, 0.0).unwrap().finite().unwrap();
        let losing = savings_duration(100_000.0, 10_000.0, -0.05).unwrap().finite().unwrap();
        assert!(losing < flat);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(savings_duration(0.0, 1.0, 0.04).unwrap_err().parameter(), Some("current_savings"));
        assert_eq!(savings_duration(1.0, 0.0, 0.04).unwrap_err().parameter(), Some("annual_withdrawal"));
        assert_eq!(savings_duration(1.0, 1.0, -1.0).unwrap_err().parameter(), Some("annual_return"));
    }
}
