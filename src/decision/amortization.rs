//! Month-by-month loan amortization

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, PlanningResult};
use crate::formulas::{guards, is_zero_rate};

/// Longest schedule produced (100 years of monthly payments)
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// Balances below this are treated as paid off
const PAID_OFF: f64 = 1e-6;

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Full amortization table with running totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl AmortizationSchedule {
    fn add_row(&mut self, row: AmortizationRow) {
        self.total_paid += row.payment;
        self.total_interest += row.interest;
        self.rows.push(row);
    }

    /// Number of payments until the balance reaches zero
    pub fn months(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn is_paid_off(&self) -> bool {
        self.rows.last().map_or(true, |r| r.closing_balance <= PAID_OFF)
    }
}

/// Months to retire `balance` with a level `payment` (may be fractional)
///
/// `-ln(1 - B·r/P) / ln(1 + r)`, or `B / P` at a zero rate.
pub fn payoff_months(balance: f64, monthly_rate: f64, payment: f64) -> PlanningResult<f64> {
    guards::non_negative("balance", balance)?;
    guards::non_negative("monthly_rate", monthly_rate)?;
    guards::positive("payment", payment)?;

    if is_zero_rate(monthly_rate) {
        return Ok(balance / payment);
    }

    let ratio = balance * monthly_rate / payment;
    if ratio >= 1.0 {
        return Err(PlanningError::invalid(
            "payment",
            "must exceed the first month's interest",
            payment,
        ));
    }

    Ok(-(1.0 - ratio).ln() / (1.0 + monthly_rate).ln())
}

/// Amortize `balance` at `monthly_rate` with a level `payment`
///
/// The final payment is reduced to whatever clears the balance. Stops after
/// [`MAX_SCHEDULE_MONTHS`].
pub fn amortization_schedule(balance: f64, monthly_rate: f64, payment: f64) -> PlanningResult<AmortizationSchedule> {
    guards::non_negative("balance", balance)?;
    guards::non_negative("monthly_rate", monthly_rate)?;
    guards::positive("payment", payment)?;

    if balance * monthly_rate >= payment {
        return Err(PlanningError::invalid(
            "payment",
            "must exceed the first month's interest",
            payment,
        ));
    }

    let mut schedule = AmortizationSchedule::default();
    let mut remaining = balance;
    let mut month = 0;

    while remaining > PAID_OFF && month < MAX_SCHEDULE_MONTHS {
        month += 1;
        let interest = remaining * monthly_rate;
        let principal = (payment - interest).min(remaining);
        let closing = remaining - principal;

        schedule.add_row(AmortizationRow {
            month,
            opening_balance: remaining,
            payment: interest + principal,
            interest,
            principal,
            closing_balance: closing,
        });

        remaining = closing;
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::payment_for_present_value;

    #[test]
    fn test_level_payment_retires_loan_on_term() {
        let rate = 0.06 / 12.0;
        let payment = payment_for_present_value(150_000.0, rate, 360.0).unwrap();
        let schedule = amortization_schedule(150_000.0, rate, payment).unwrap();

        assert!(schedule.is_paid_off());
        assert_eq!(schedule.months(), 360);
        let closed_form_interest = payment * 360.0 - 150_000.0;
        assert!((schedule.total_interest - closed_form_interest).abs() < 0.01);
    }

    #[test]
    fn test_payoff_months_matches_schedule() {
        let rate = 0.045 / 12.0;
        let months = payoff_months(200_000.0, rate, 2_000.0).unwrap();
        let schedule = amortization_schedule(200_000.0, rate, 2_000.0).unwrap();
        assert_eq!(schedule.months(), months.ceil() as u32);
    }

    #[test]
    fn test_first_row_split() {
        let schedule = amortization_schedule(10_000.0, 0.01, 500.0).unwrap();
        let first = schedule.rows[0];
        assert!((first.interest - 100.0).abs() < 1e-12);
        assert!((first.principal - 400.0).abs() < 1e-12);
        assert!((first.closing_balance - 9_600.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate() {
        assert_eq!(payoff_months(12_000.0, 0.0, 1_000.0).unwrap(), 12.0);
        let schedule = amortization_schedule(12_000.0, 0.0, 1_000.0).unwrap();
        assert_eq!(schedule.months(), 12);
        assert_eq!(schedule.total_interest, 0.0);
    }

    #[test]
    fn test_payment_below_interest_rejected() {
        assert!(payoff_months(100_000.0, 0.01, 1_000.0).is_err());
        assert!(amortization_schedule(100_000.0, 0.01, 900.0).is_err());
    }
}
