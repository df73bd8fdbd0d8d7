//! Retirement-age estimation from a savings strategy

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::PlanningResult;
use crate::formulas::{guards, is_zero_rate};
use crate::outcome::Outcome;
use crate::solver::{solve_periods_with, SolverConfig, SolverResult};

/// Youngest age the estimator accepts
pub const MIN_AGE: u32 = 18;

/// Oldest age the estimator accepts, and the cap applied to its answer
pub const MAX_AGE: u32 = 100;

/// Inputs to the retirement-age estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub current_savings: f64,
    /// Gross annual income
    pub annual_income: f64,
    /// Fraction of income saved each year (0.15 = 15%)
    pub savings_rate: f64,
    pub target_nest_egg: f64,
    /// Expected annual return
    pub expected_return: f64,
}

/// Result of the retirement-age estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementEstimate {
    /// Age at which the nest egg is reached, capped at [`MAX_AGE`]
    pub retirement_age: Outcome<u32>,
    /// Years until the nest egg is reached, before rounding and capping
    pub years_needed: Outcome<f64>,
    /// True when the uncapped age would have exceeded [`MAX_AGE`]
    pub capped_at_max_age: bool,
    /// Present when the bisection solver was used
    pub solver: Option<SolverResult>,
}

/// Age at which the target nest egg is reached
///
/// Returns [`Outcome::Unreachable`] when there are no savings and nothing is
/// contributed. Ages beyond 100 are capped at 100; this is a planning-horizon
/// policy, see [`RetirementEstimate::capped_at_max_age`] to detect it.
///
/// # Example
/// ```
/// use retirement_planner::planning::retirement_age_estimator;
///
/// let age = retirement_age_estimator(30, 50_000.0, 100_000.0, 0.15, 1_000_000.0, 0.07)
///     .unwrap()
///     .finite()
///     .unwrap();
/// assert!((45..=65).contains(&age));
/// ```
pub fn retirement_age_estimator(
    current_age: u32,
    current_savings: f64,
    annual_income: f64,
    savings_rate: f64,
    target_nest_egg: f64,
    expected_return: f64,
) -> PlanningResult<Outcome<u32>> {
    let inputs = RetirementInputs {
        current_age,
        current_savings,
        annual_income,
        savings_rate,
        target_nest_egg,
        expected_return,
    };
    Ok(estimate_retirement(&inputs, &SolverConfig::default())?.retirement_age)
}

/// Full retirement-age estimate with the solver diagnostics
pub fn estimate_retirement(inputs: &RetirementInputs, solver: &SolverConfig) -> PlanningResult<RetirementEstimate> {
    inputs.validate()?;

    let savings = inputs.current_savings;
    let target = inputs.target_nest_egg;
    let rate = inputs.expected_return;
    let contribution = inputs.annual_contribution();

    let mut solver_result = None;
    let years_needed = if savings >= target {
        Outcome::Finite(0.0)
    } else if contribution == 0.0 {
        growth_only_years(savings, target, rate)
    } else if rate < 0.0 && contribution / -rate <= target {
        // The balance levels off at contribution / |rate|
        debug!("negative return {}: balance levels off below the target", rate);
        Outcome::Unreachable
    } else if is_zero_rate(rate) {
        debug!("zero return: linear accumulation of {} per year", contribution);
        Outcome::Finite(((target - savings) / contribution).max(0.0))
    } else {
        let result = solve_periods_with(savings, contribution, target, rate, solver)?;
        debug!(
            "solver estimate {} years ({} iterations, converged: {})",
            result.periods, result.iterations, result.converged
        );
        solver_result = Some(result);
        Outcome::Finite(result.periods)
    };

    let mut capped_at_max_age = false;
    let retirement_age = years_needed.map(|years| {
        let age = inputs.current_age as f64 + years.ceil();
        if age > MAX_AGE as f64 {
            warn!("retirement age {} exceeds {}, capping", age, MAX_AGE);
            capped_at_max_age = true;
            MAX_AGE
        } else {
            age as u32
        }
    });

    Ok(RetirementEstimate {
        retirement_age,
        years_needed,
        capped_at_max_age,
        solver: solver_result,
    })
}

/// Years for existing savings alone to grow to `target`
fn growth_only_years(savings: f64, target: f64, rate: f64) -> Outcome<f64> {
    if savings == 0.0 {
        debug!("no savings and no contributions: target unreachable");
        return Outcome::Unreachable;
    }
    if savings >= target {
        return Outcome::Finite(0.0);
    }
    if rate <= 0.0 {
        debug!("savings below target with non-positive return {}: unreachable", rate);
        return Outcome::Unreachable;
    }
    Outcome::Finite((target / savings).ln() / (1.0 + rate).ln())
}

impl RetirementInputs {
    pub fn annual_contribution(&self) -> f64 {
        self.annual_income * self.savings_rate
    }

    pub fn validate(&self) -> PlanningResult<()> {
        guards::within(
            "current_age",
            "must be between 18 and 100",
            self.current_age as f64,
            MIN_AGE as f64,
            MAX_AGE as f64,
        )?;
        guards::non_negative("current_savings", self.current_savings)?;
        guards::positive("annual_income", self.annual_income)?;
        guards::fraction("savings_rate", self.savings_rate)?;
        guards::positive("target_nest_egg", self.target_nest_egg)?;
        guards::rate("expected_return", self.expected_return)?;
        Ok(())
    }
}
