//! Numeric period solver for targets with no closed-form inverse
//!
//! A lump sum growing alongside an annuity has no algebraic inverse for the
//! number of periods, so [`solve_periods_for_target`] brackets the answer and
//! bisects. With non-negative flows and a non-negative rate the combined
//! future value is non-decreasing in the period count, which is all bisection
//! needs. Negative rates still terminate but the estimate is best-effort.

mod bisection;

pub use bisection::bisect_increasing;

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, PlanningResult};
use crate::formulas::{self, guards};

/// Default absolute tolerance on the target value
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Default iteration budget
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Default upper end of the period bracket
pub const DEFAULT_MAX_PERIODS: f64 = 100.0;

/// Bracket and exit conditions for the bisection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Lower end of the period bracket
    pub lower: f64,
    /// Upper end of the period bracket
    pub upper: f64,
    pub max_iterations: u32,
    /// Absolute tolerance on the objective
    pub tolerance: f64,
    /// Evaluate whole periods only (candidate truncated before evaluation)
    pub integer_periods: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: DEFAULT_MAX_PERIODS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            integer_periods: true,
        }
    }
}

impl SolverConfig {
    /// Default bracket with a different tolerance
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> PlanningResult<()> {
        guards::non_negative("lower", self.lower)?;
        guards::positive("tolerance", self.tolerance)?;
        if !self.upper.is_finite() || self.upper <= self.lower {
            return Err(PlanningError::Config(format!(
                "solver bracket [{}, {}] is empty",
                self.lower, self.upper
            )));
        }
        if self.max_iterations == 0 {
            return Err(PlanningError::Config("solver needs at least one iteration".into()));
        }
        Ok(())
    }
}

/// Outcome of a bisection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Estimated number of periods (not necessarily integral)
    pub periods: f64,
    pub iterations: u32,
    /// Objective minus target at the estimate
    pub residual: f64,
    /// Whether the residual fell within tolerance
    pub converged: bool,
}

/// Periods until `pv` plus end-of-period `payment`s grows to `target`
///
/// Solves `FV(pv, r, n) + FV_annuity(payment, r, n) ≈ target` for `n` over
/// `[0, 100]` periods. Period candidates are truncated to whole periods, so
/// the answer can be off by one period; callers should treat it that way.
///
/// # Example
/// ```
/// use retirement_planner::solver::solve_periods_for_target;
///
/// let result = solve_periods_for_target(50_000.0, 15_000.0, 1_000_000.0, 0.07, 0.01).unwrap();
/// assert_eq!(result.periods.ceil(), 23.0);
/// ```
pub fn solve_periods_for_target(
    present_value: f64,
    payment: f64,
    target: f64,
    rate: f64,
    tolerance: f64,
) -> PlanningResult<SolverResult> {
    solve_periods_with(present_value, payment, target, rate, &SolverConfig::with_tolerance(tolerance))
}

/// [`solve_periods_for_target`] with an explicit bracket and exit policy
pub fn solve_periods_with(
    present_value: f64,
    payment: f64,
    target: f64,
    rate: f64,
    config: &SolverConfig,
) -> PlanningResult<SolverResult> {
    guards::non_negative("present_value", present_value)?;
    guards::non_negative("payment", payment)?;
    guards::non_negative("target", target)?;
    guards::rate("rate", rate)?;

    bisect_increasing(
        |n| {
            Ok(formulas::future_value(present_value, rate, n)?
                + formulas::future_value_of_annuity(payment, rate, n)?)
        },
        target,
        config,
    )
}
