//! Pay down a mortgage faster, or invest the extra cash?

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::amortization::{amortization_schedule, payoff_months, AmortizationSchedule};
use crate::error::PlanningResult;
use crate::formulas::{self, guards};

/// Which use of the extra cash comes out ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Invest,
    PayDownDebt,
}

impl Recommendation {
    /// `Invest` only for a strictly positive net benefit; a tie goes to
    /// paying down the debt.
    pub fn from_net_benefit(net_benefit: f64) -> Self {
        if net_benefit > 0.0 {
            Recommendation::Invest
        } else {
            Recommendation::PayDownDebt
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Invest => "invest",
            Recommendation::PayDownDebt => "pay_down_debt",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to the mortgage-vs-invest comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageScenario {
    /// Outstanding loan balance
    pub balance: f64,
    /// Annual loan rate (nominal, compounded monthly)
    pub mortgage_rate: f64,
    /// Remaining term in years
    pub term_years: u32,
    /// Expected annual investment return (nominal, compounded monthly)
    pub investment_return: f64,
    /// Extra monthly cash on top of the scheduled payment.
    /// `None` doubles the scheduled payment.
    #[serde(default)]
    pub extra_payment: Option<f64>,
}

/// Result of the mortgage-vs-invest comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageAnalysis {
    /// Scheduled monthly payment over the remaining term
    pub mortgage_payment: f64,
    pub extra_payment: f64,
    /// Scheduled payment plus the extra
    pub accelerated_payment: f64,
    /// Months to payoff at the accelerated payment
    pub payoff_months: f64,
    pub payoff_years: f64,
    pub baseline_interest: f64,
    pub accelerated_interest: f64,
    pub interest_saved: f64,
    /// Extra payment invested monthly over the accelerated payoff period
    pub investment_value: f64,
    /// `investment_value - interest_saved`
    pub net_benefit: f64,
    pub recommendation: Recommendation,
    pub rationale: String,
}

/// Compare accelerating a mortgage (double payments) with investing the extra
///
/// # Example
/// ```
/// use retirement_planner::decision::{mortgage_vs_invest, Recommendation};
///
/// let analysis = mortgage_vs_invest(200_000.0, 0.03, 15, 0.07).unwrap();
/// assert_eq!(analysis.recommendation, Recommendation::Invest);
/// ```
pub fn mortgage_vs_invest(
    balance: f64,
    mortgage_rate: f64,
    term_years: u32,
    investment_return: f64,
) -> PlanningResult<MortgageAnalysis> {
    MortgageScenario {
        balance,
        mortgage_rate,
        term_years,
        investment_return,
        extra_payment: None,
    }
    .analyze()
}

impl MortgageScenario {
    pub fn validate(&self) -> PlanningResult<()> {
        guards::positive("mortgage_balance", self.balance)?;
        guards::non_negative("mortgage_rate", self.mortgage_rate)?;
        guards::positive("mortgage_years", self.term_years as f64)?;
        guards::rate("investment_return", self.investment_return)?;
        if let Some(extra) = self.extra_payment {
            guards::positive("extra_payment", extra)?;
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        self.mortgage_rate / 12.0
    }

    pub fn term_months(&self) -> f64 {
        self.term_years as f64 * 12.0
    }

    /// Scheduled monthly payment over the remaining term
    pub fn scheduled_payment(&self) -> PlanningResult<f64> {
        formulas::payment_for_present_value(self.balance, self.monthly_rate(), self.term_months())
    }

    pub fn analyze(&self) -> PlanningResult<MortgageAnalysis> {
        self.validate()?;

        let monthly_rate = self.monthly_rate();
        let total_payments = self.term_months();
        let mortgage_payment = self.scheduled_payment()?;

        let extra_payment = self.extra_payment.unwrap_or(mortgage_payment);
        let accelerated_payment = mortgage_payment + extra_payment;
        let months = payoff_months(self.balance, monthly_rate, accelerated_payment)?;

        let baseline_interest = mortgage_payment * total_payments - self.balance;
        let accelerated_interest = accelerated_payment * months - self.balance;
        let interest_saved = baseline_interest - accelerated_interest;

        // Whole months of contributions over the accelerated payoff period
        let investment_value =
            formulas::future_value_of_annuity(extra_payment, self.investment_return / 12.0, months.trunc())?;

        let net_benefit = investment_value - interest_saved;
        let recommendation = Recommendation::from_net_benefit(net_benefit);
        debug!(
            "mortgage analysis: payoff in {:.1} months, interest saved {:.2}, invested {:.2}, net {:.2}",
            months, interest_saved, investment_value, net_benefit
        );

        Ok(MortgageAnalysis {
            mortgage_payment,
            extra_payment,
            accelerated_payment,
            payoff_months: months,
            payoff_years: months / 12.0,
            baseline_interest,
            accelerated_interest,
            interest_saved,
            investment_value,
            net_benefit,
            recommendation,
            rationale: rationale(recommendation, extra_payment, net_benefit),
        })
    }

    /// Month-by-month schedule at the scheduled payment
    pub fn baseline_schedule(&self) -> PlanningResult<AmortizationSchedule> {
        self.validate()?;
        amortization_schedule(self.balance, self.monthly_rate(), self.scheduled_payment()?)
    }

    /// Month-by-month schedule at the accelerated payment
    pub fn accelerated_schedule(&self) -> PlanningResult<AmortizationSchedule> {
        self.validate()?;
        let scheduled = self.scheduled_payment()?;
        let extra = self.extra_payment.unwrap_or(scheduled);
        amortization_schedule(self.balance, self.monthly_rate(), scheduled + extra)
    }
}

fn rationale(recommendation: Recommendation, extra_payment: f64, net_benefit: f64) -> String {
    match recommendation {
        Recommendation::Invest => format!(
            "Investing the extra {:.2} per month beats paying down the mortgage by {:.2} (net benefit {:+.2})",
            extra_payment,
            net_benefit.abs(),
            net_benefit
        ),
        Recommendation::PayDownDebt => format!(
            "Paying down the mortgage beats investing the extra {:.2} per month by {:.2} (net benefit {:+.2})",
            extra_payment,
            net_benefit.abs(),
            net_benefit
        ),
    }
}
